mod chat;
mod client;
mod embeddings;
mod error;
mod parse;
mod prompts;
mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, OpenAiClient, OpenAiConfig,
    RetryConfig,
};
pub use error::Error;
pub use parse::parse_index_list;
pub use prompts::{GenerationPrompt, ValidationPrompt};
pub use types::*;
