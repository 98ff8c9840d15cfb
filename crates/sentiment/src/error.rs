use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inference API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("no known sentiment labels in response: {0:?}")]
    UnknownLabels(Vec<String>),
}

impl Error {
    /// 503 is what the hosted API answers while a model is loading.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => matches!(
                e,
                ureq::Error::Io(_)
                    | ureq::Error::Timeout(_)
                    | ureq::Error::ConnectionFailed
                    | ureq::Error::HostNotFound
            ),
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
