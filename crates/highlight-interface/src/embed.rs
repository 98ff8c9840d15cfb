use crate::Error;

pub type Embedding = Vec<f32>;

/// Text to fixed-length vector.
///
/// Implementations must be usable from several threads at once: the
/// embedding cache fans sentence calls out over a rayon pool on a miss.
/// Repeated calls on identical text should yield vectors that rank the
/// same way under cosine similarity; bit-exact determinism is not required.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Embedding, Error>;
}

impl<T: Embedder + ?Sized> Embedder for &T {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        (**self).embed(text)
    }
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        (**self).embed(text)
    }
}
