use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Segmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Segments taken before the anchor's own.
    pub back: usize,
    /// Segments taken after the anchor's own.
    pub forward: usize,
    /// Nearest sentences whose segments join the context.
    pub similar_top_n: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            back: 0,
            forward: 2,
            similar_top_n: 2,
        }
    }
}

/// Builds the candidate context of an anchor sentence from the segmentation
/// and the similarity matrix it was derived from.
pub struct ContextAssembler<'a> {
    segmentation: &'a Segmentation,
    similarities: &'a [Vec<f64>],
    config: ContextConfig,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(
        segmentation: &'a Segmentation,
        similarities: &'a [Vec<f64>],
        config: ContextConfig,
    ) -> Self {
        Self {
            segmentation,
            similarities,
            config,
        }
    }

    /// Sentences of the anchor's segment and its configured neighbors.
    pub fn consecutive(&self, anchor: usize) -> Vec<usize> {
        let Some(segment) = self.segmentation.segment_of(anchor) else {
            return Vec::new();
        };
        let first = segment.saturating_sub(self.config.back);
        let last = segment.saturating_add(self.config.forward);
        self.segmentation.sentences_in(first, last)
    }

    /// The `similar_top_n` sentences closest to the anchor, other than the
    /// anchor, ties going to the earlier sentence.
    pub fn nearest(&self, anchor: usize) -> Vec<usize> {
        let Some(row) = self.similarities.get(anchor) else {
            return Vec::new();
        };

        let mut candidates: Vec<usize> = (0..row.len()).filter(|&i| i != anchor).collect();
        candidates.sort_by(|&a, &b| match row[b].total_cmp(&row[a]) {
            Ordering::Equal => a.cmp(&b),
            other => other,
        });
        candidates.truncate(self.config.similar_top_n);
        candidates
    }

    /// Every sentence sharing a segment with one of the nearest sentences,
    /// without the anchor.
    pub fn similar(&self, anchor: usize) -> Vec<usize> {
        let segments: BTreeSet<usize> = self
            .nearest(anchor)
            .into_iter()
            .filter_map(|i| self.segmentation.segment_of(i))
            .collect();

        self.segmentation
            .ids()
            .iter()
            .enumerate()
            .filter(|&(i, id)| i != anchor && segments.contains(id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Sorted union of the consecutive and similar contexts.
    pub fn assemble(&self, anchor: usize) -> Vec<usize> {
        let context: BTreeSet<usize> = self
            .consecutive(anchor)
            .into_iter()
            .chain(self.similar(anchor))
            .collect();

        tracing::debug!(anchor, sentences = context.len(), "context_assembled");
        context.into_iter().collect()
    }
}
