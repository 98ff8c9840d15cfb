use std::collections::BTreeMap;

use hypr_transcript::Transcript;
use serde::Serialize;

use crate::SalienceExtractor;

/// Union of extractor outputs, keyed by anchor sentence, remembering which
/// extractors flagged each anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightSet {
    len: usize,
    anchors: BTreeMap<usize, Vec<&'static str>>,
}

impl HighlightSet {
    /// An empty set for a transcript of `len` sentences.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            anchors: BTreeMap::new(),
        }
    }

    /// Adds indices flagged by `source`, skipping out-of-range ones. Returns
    /// how many were accepted.
    pub fn add(&mut self, source: &'static str, indices: &[usize]) -> usize {
        let mut accepted = 0;
        for &index in indices {
            if index >= self.len {
                tracing::debug!(source, index, len = self.len, "highlight_out_of_range");
                continue;
            }
            let sources = self.anchors.entry(index).or_default();
            if !sources.contains(&source) {
                sources.push(source);
            }
            accepted += 1;
        }
        accepted
    }

    pub fn merge(&mut self, other: &HighlightSet) {
        for (&anchor, sources) in &other.anchors {
            for &source in sources {
                self.add(source, &[anchor]);
            }
        }
    }

    /// Anchors in ascending order.
    pub fn anchors(&self) -> impl Iterator<Item = usize> + '_ {
        self.anchors.keys().copied()
    }

    pub fn sources(&self, anchor: usize) -> &[&'static str] {
        self.anchors.get(&anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, anchor: usize) -> bool {
        self.anchors.contains_key(&anchor)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Run every extractor with its budget and union the results.
pub fn aggregate(
    transcript: &Transcript,
    extractors: &[(&dyn SalienceExtractor, usize)],
) -> HighlightSet {
    let mut set = HighlightSet::new(transcript.len());

    for &(extractor, budget) in extractors {
        let ranked = extractor.rank(transcript, budget);
        let accepted = set.add(extractor.name(), &ranked);
        tracing::info!(extractor = extractor.name(), budget, ranked = ranked.len(), accepted, "salience_extracted");
    }

    tracing::info!(highlights = set.len(), "highlights_aggregated");
    set
}
