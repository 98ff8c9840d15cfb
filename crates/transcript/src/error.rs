#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {index}: missing sentence text")]
    MissingText { index: usize },
    #[error("row {index}: missing duration")]
    MissingDuration { index: usize },
    #[error("row {index}: duration {value:?} is not a number")]
    UnparsableDuration { index: usize, value: String },
    #[error("sentence {index}: duration {value} must be finite and non-negative")]
    InvalidDuration { index: usize, value: f64 },
    #[error("pause offset {0} must be finite and non-negative")]
    InvalidPauseOffset(f64),
    #[error("{sentences} sentences but {embeddings} embeddings")]
    EmbeddingCountMismatch { sentences: usize, embeddings: usize },
    #[error("sentence {index}: embedding has {found} dimensions, expected {expected}")]
    EmbeddingDimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}
