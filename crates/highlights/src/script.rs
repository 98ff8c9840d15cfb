use std::collections::{HashMap, HashSet};

use hypr_highlight_interface::LengthBounds;
use hypr_transcript::Transcript;
use serde::Serialize;

use crate::Rejection;

/// Check an oracle-picked subsequence against its context and return it
/// sorted ascending.
pub fn admit(raw: &[usize], context: &[usize], bounds: LengthBounds) -> Result<Vec<usize>, Rejection> {
    if raw.is_empty() {
        return Err(Rejection::Empty);
    }
    if !bounds.contains(raw.len()) {
        return Err(Rejection::Length {
            len: raw.len(),
            bounds,
        });
    }

    let context: HashSet<usize> = context.iter().copied().collect();
    let mut seen = HashSet::with_capacity(raw.len());
    for &index in raw {
        if !seen.insert(index) {
            return Err(Rejection::Duplicate(index));
        }
        if !context.contains(&index) {
            return Err(Rejection::OutsideContext(index));
        }
    }

    let mut admitted = raw.to_vec();
    admitted.sort_unstable();
    Ok(admitted)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptCandidate {
    pub indices: Vec<usize>,
    pub text: String,
}

/// Script candidates keyed by their index tuple, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ScriptBook {
    entries: Vec<ScriptCandidate>,
    positions: HashMap<Vec<usize>, usize>,
}

impl ScriptBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `indices -> text` unless the tuple is empty or already
    /// present. Returns whether it was stored.
    pub fn insert(&mut self, indices: Vec<usize>, text: String) -> bool {
        if indices.is_empty() || self.positions.contains_key(&indices) {
            return false;
        }
        self.positions.insert(indices.clone(), self.entries.len());
        self.entries.push(ScriptCandidate { indices, text });
        true
    }

    /// Stores an admitted tuple with its sentence texts joined in order.
    pub fn insert_from(&mut self, transcript: &Transcript, indices: Vec<usize>) -> bool {
        let text = transcript.join_text(&indices);
        self.insert(indices, text)
    }

    pub fn get(&self, indices: &[usize]) -> Option<&ScriptCandidate> {
        self.positions.get(indices).map(|&i| &self.entries[i])
    }

    /// Candidate by insertion position.
    pub fn nth(&self, position: usize) -> Option<&ScriptCandidate> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptCandidate> {
        self.entries.iter()
    }

    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_candidates(self) -> Vec<ScriptCandidate> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Vec<usize> {
        (10..30).collect()
    }

    #[test]
    fn admits_and_sorts() {
        let raw = [15, 11, 12, 20, 13, 14];
        assert_eq!(
            admit(&raw, &context(), LengthBounds::default()),
            Ok(vec![11, 12, 13, 14, 15, 20])
        );
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(
            admit(&[10, 11, 12], &context(), LengthBounds::new(6, 12)),
            Err(Rejection::Length {
                len: 3,
                bounds: LengthBounds::new(6, 12)
            })
        );
    }

    #[test]
    fn rejects_too_long() {
        let raw: Vec<usize> = (10..23).collect();
        assert!(matches!(
            admit(&raw, &context(), LengthBounds::default()),
            Err(Rejection::Length { len: 13, .. })
        ));
    }

    #[test]
    fn rejects_empty_duplicates_and_strangers() {
        let bounds = LengthBounds::new(1, 12);
        assert_eq!(admit(&[], &context(), bounds), Err(Rejection::Empty));
        assert_eq!(admit(&[11, 12, 11], &context(), bounds), Err(Rejection::Duplicate(11)));
        assert_eq!(admit(&[11, 2], &context(), bounds), Err(Rejection::OutsideContext(2)));
    }

    #[test]
    fn book_dedups_by_tuple() {
        let mut book = ScriptBook::new();

        assert!(book.insert(vec![1, 2, 3], "a b c".into()));
        assert!(!book.insert(vec![1, 2, 3], "other".into()));
        assert!(book.insert(vec![1, 2], "a b".into()));

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&[1, 2, 3]).unwrap().text, "a b c");
        assert_eq!(book.nth(1).unwrap().indices, vec![1, 2]);
    }

    #[test]
    fn book_never_stores_empty() {
        let mut book = ScriptBook::new();
        assert!(!book.insert(Vec::new(), String::new()));
        assert!(book.is_empty());
    }
}
