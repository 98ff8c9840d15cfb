use std::collections::BTreeSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MIN_PROMINENCE, DEFAULT_ORDER, DEFAULT_P_SIZE, activate_similarities, local_minima};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Number of forward offsets that carry weight in the activation.
    pub p_size: usize,
    /// Comparator radius for boundary detection.
    pub order: usize,
    pub min_prominence: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            p_size: DEFAULT_P_SIZE,
            order: DEFAULT_ORDER,
            min_prominence: DEFAULT_MIN_PROMINENCE,
        }
    }
}

/// One segment id per sentence. Ids start at 0 and only grow with the
/// sentence index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Segmentation {
    ids: Vec<usize>,
}

impl Segmentation {
    /// Ids for `len` sentences, opening a new segment at every boundary.
    /// Boundary 0 and out-of-range boundaries are ignored.
    pub fn from_boundaries(len: usize, boundaries: &[usize]) -> Self {
        let boundaries: BTreeSet<usize> = boundaries.iter().copied().filter(|&b| b > 0).collect();
        let mut current = 0;
        let ids = (0..len)
            .map(|i| {
                if boundaries.contains(&i) {
                    current += 1;
                }
                current
            })
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn segment_of(&self, sentence: usize) -> Option<usize> {
        self.ids.get(sentence).copied()
    }

    /// Number of distinct segments.
    pub fn count(&self) -> usize {
        self.ids.last().map_or(0, |&last| last + 1)
    }

    /// Sentence range of every segment, in segment order.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::with_capacity(self.count());
        for (i, &id) in self.ids.iter().enumerate() {
            if id < ranges.len() {
                ranges[id].end = i + 1;
            } else {
                ranges.push(i..i + 1);
            }
        }
        ranges
    }

    /// Sentences whose segment id lies in `[first, last]`, ascending.
    pub fn sentences_in(&self, first: usize, last: usize) -> Vec<usize> {
        self.ids
            .iter()
            .enumerate()
            .filter(|&(_, &id)| id >= first && id <= last)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Partition a transcript from its square cosine-similarity matrix.
pub fn segment(similarities: &[Vec<f64>], config: &SegmenterConfig) -> Segmentation {
    let activated = activate_similarities(similarities, config.p_size);
    let boundaries = local_minima(&activated, config.order, config.min_prominence);
    let segmentation = Segmentation::from_boundaries(similarities.len(), &boundaries);

    tracing::info!(
        sentences = segmentation.len(),
        segments = segmentation.count(),
        "transcript_segmented"
    );
    segmentation
}
