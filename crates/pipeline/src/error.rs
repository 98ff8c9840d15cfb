#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid pipeline config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Transcript(#[from] hypr_transcript::Error),
    #[error(transparent)]
    Embedding(#[from] hypr_embedding::Error),
}
