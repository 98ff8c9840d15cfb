pub mod embeddings;
mod error;
pub mod fs;

pub use embeddings::{EmbeddingStore, FsEmbeddingStore, MemoryEmbeddingStore};
pub use error::*;
