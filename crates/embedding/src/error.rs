#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Embedding(#[from] hypr_highlight_interface::Error),
    #[error(transparent)]
    Storage(#[from] hypr_storage::Error),
    #[error("embedding for sentence {index} has {found} dimensions, expected {expected}")]
    InconsistentDimensions {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("cache lock poisoned for {0:?}")]
    LockPoisoned(String),
}
