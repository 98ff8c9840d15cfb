use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OpenAI API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("prompt rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("response contained no {0}")]
    EmptyResponse(&'static str),

    #[error("expected a comma-separated list of numbers, got {0:?}")]
    Unparsable(String),
}

impl Error {
    /// Transport failures, rate limiting and server errors are worth
    /// another attempt; everything else fails the same way again.
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

impl From<Error> for hypr_highlight_interface::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Unparsable(text) => hypr_highlight_interface::Error::MalformedOutput(text),
            other => hypr_highlight_interface::Error::oracle(other),
        }
    }
}
