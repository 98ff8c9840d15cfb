use std::collections::HashSet;

use hypr_highlight_interface::{Error, ValidationOracle};

use crate::ScriptBook;

pub const DEFAULT_DESIRED_COUNT: usize = 5;

/// Keep distinct indices below `candidates`, at most `desired`, in the
/// order given.
pub fn sanitize_selection(raw: &[usize], candidates: usize, desired: usize) -> Vec<usize> {
    let mut seen = HashSet::new();
    raw.iter()
        .copied()
        .filter(|&i| i < candidates && seen.insert(i))
        .take(desired)
        .collect()
}

/// Ask the validation oracle for the final picks among the book's scripts.
/// Returned values are positions in the book.
pub fn select<V: ValidationOracle + ?Sized>(
    book: &ScriptBook,
    oracle: &V,
    desired: usize,
) -> Result<Vec<usize>, Error> {
    if book.is_empty() || desired == 0 {
        return Ok(Vec::new());
    }

    let raw = oracle.validate(&book.texts(), desired)?;
    let selection = sanitize_selection(&raw, book.len(), desired);
    if selection.len() != raw.len() {
        tracing::warn!(returned = raw.len(), kept = selection.len(), "selection_sanitized");
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_out_of_range_and_repeats() {
        assert_eq!(sanitize_selection(&[3, 9, 3, 0, 1], 4, 5), vec![3, 0, 1]);
    }

    #[test]
    fn sanitize_truncates_to_desired() {
        assert_eq!(sanitize_selection(&[0, 1, 2, 3], 4, 2), vec![0, 1]);
    }

    struct Echo(Vec<usize>);

    impl ValidationOracle for Echo {
        fn validate(&self, _scripts: &[String], _desired: usize) -> Result<Vec<usize>, Error> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn select_sanitizes_oracle_output() {
        let mut book = ScriptBook::new();
        book.insert(vec![0], "zero".into());
        book.insert(vec![1], "one".into());

        assert_eq!(select(&book, &Echo(vec![1, 1, 7, 0]), 5).unwrap(), vec![1, 0]);
    }

    #[test]
    fn empty_book_skips_oracle() {
        struct Unreachable;
        impl ValidationOracle for Unreachable {
            fn validate(&self, _: &[String], _: usize) -> Result<Vec<usize>, Error> {
                panic!("oracle called for an empty book");
            }
        }

        assert!(select(&ScriptBook::new(), &Unreachable, 5).unwrap().is_empty());
    }
}
