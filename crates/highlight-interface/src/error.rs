pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by an external collaborator (embedding model, sentiment
/// model, generative oracle). The variant tells the caller which service
/// failed so it can decide between failing the batch and skipping one item.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("embedding failed: {0}")]
    Embedding(#[source] BoxError),
    #[error("sentiment classification failed: {0}")]
    Sentiment(#[source] BoxError),
    #[error("oracle call failed: {0}")]
    Oracle(#[source] BoxError),
    #[error("malformed oracle output: {0}")]
    MalformedOutput(String),
}

impl Error {
    pub fn embedding(err: impl Into<BoxError>) -> Self {
        Self::Embedding(err.into())
    }

    pub fn sentiment(err: impl Into<BoxError>) -> Self {
        Self::Sentiment(err.into())
    }

    pub fn oracle(err: impl Into<BoxError>) -> Self {
        Self::Oracle(err.into())
    }
}
