use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hypr_highlight_interface::{Embedder, Embedding};
use hypr_storage::EmbeddingStore;
use rayon::prelude::*;

use crate::Error;

/// Transcript-keyed embedding cache over a persistent store.
///
/// Calls for the same id are serialized inside one process; calls for
/// different ids run independently. Across processes the store's atomic
/// writes decide, last writer wins.
pub struct EmbeddingCache<S, E> {
    store: S,
    embedder: E,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: EmbeddingStore, E: Embedder> EmbeddingCache<S, E> {
    pub fn new(store: S, embedder: E) -> Self {
        Self {
            store,
            embedder,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// One vector per sentence, in sentence order.
    ///
    /// A stored entry is returned as-is when its length matches `sentences`.
    /// Otherwise every sentence is embedded, and the result is stored only
    /// if all of them succeed.
    pub fn get_or_compute(
        &self,
        transcript_id: &str,
        sentences: &[&str],
    ) -> Result<Vec<Embedding>, Error> {
        let lock = self.lock_for(transcript_id)?;
        let result = self.get_or_compute_locked(&lock, transcript_id, sentences);
        self.release(transcript_id, lock);
        result
    }

    fn get_or_compute_locked(
        &self,
        lock: &Mutex<()>,
        transcript_id: &str,
        sentences: &[&str],
    ) -> Result<Vec<Embedding>, Error> {
        let _guard = lock
            .lock()
            .map_err(|_| Error::LockPoisoned(transcript_id.to_string()))?;

        if let Some(vectors) = self.load_fresh(transcript_id, sentences.len())? {
            tracing::info!(transcript_id = %transcript_id, sentences = sentences.len(), "embeddings_cache_hit");
            return Ok(vectors);
        }

        tracing::info!(transcript_id = %transcript_id, sentences = sentences.len(), "embeddings_cache_miss");
        let vectors = self.compute(sentences)?;
        self.store.save(transcript_id, &vectors)?;
        tracing::info!(transcript_id = %transcript_id, sentences = vectors.len(), "embeddings_cached");

        Ok(vectors)
    }

    fn load_fresh(&self, transcript_id: &str, expected: usize) -> Result<Option<Vec<Embedding>>, Error> {
        if !self.store.exists(transcript_id)? {
            return Ok(None);
        }

        let vectors = match self.store.load(transcript_id) {
            Ok(vectors) => vectors,
            Err(hypr_storage::Error::Json(e)) => {
                tracing::warn!(transcript_id = %transcript_id, error = %e, "embeddings_cache_unreadable");
                return Ok(None);
            }
            Err(e @ hypr_storage::Error::UnsupportedVersion { .. }) => {
                tracing::warn!(transcript_id = %transcript_id, error = %e, "embeddings_cache_unreadable");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if vectors.len() != expected {
            tracing::warn!(
                transcript_id = %transcript_id,
                stored = vectors.len(),
                expected,
                "embeddings_cache_stale"
            );
            return Ok(None);
        }

        Ok(Some(vectors))
    }

    fn compute(&self, sentences: &[&str]) -> Result<Vec<Embedding>, Error> {
        let vectors = sentences
            .par_iter()
            .map(|text| self.embedder.embed(text))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = vectors.first() {
            let expected = first.len();
            if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != expected) {
                return Err(Error::InconsistentDimensions {
                    index,
                    expected,
                    found: v.len(),
                });
            }
        }

        Ok(vectors)
    }

    fn lock_for(&self, transcript_id: &str) -> Result<Arc<Mutex<()>>, Error> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| Error::LockPoisoned(transcript_id.to_string()))?;
        Ok(locks.entry(transcript_id.to_string()).or_default().clone())
    }

    // Clones are only handed out under the map lock, so a count of two
    // (the map and `lock`) means nobody else is waiting on this id.
    fn release(&self, transcript_id: &str, lock: Arc<Mutex<()>>) {
        let Ok(mut locks) = self.locks.lock() else {
            return;
        };
        if Arc::strong_count(&lock) == 2 {
            locks.remove(transcript_id);
        }
    }
}
