#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("cache directory not available")]
    DataDirUnavailable,
    #[error("no embeddings stored for {0:?}")]
    NotFound(String),
    #[error("invalid transcript id {0:?}")]
    InvalidId(String),
    #[error("stored embeddings for {id:?} have format version {found}, expected {expected}")]
    UnsupportedVersion { id: String, found: u32, expected: u32 },
}
