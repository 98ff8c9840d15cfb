mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, HfSentimentClient, HfSentimentConfig};
pub use error::Error;
pub use types::*;
