use std::sync::atomic::{AtomicUsize, Ordering};

use embedding::EmbeddingCache;
use hypr_highlight_interface::{Embedder, Embedding, Error};
use hypr_storage::{EmbeddingStore, Error as StorageError, FsEmbeddingStore};

struct CharEmbedder;

impl Embedder for CharEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count();
        Ok(vec![text.len() as f32, vowels as f32])
    }
}

struct PanickingEmbedder;

impl Embedder for PanickingEmbedder {
    fn embed(&self, _text: &str) -> Result<Embedding, Error> {
        panic!("embedder must not be called on a cache hit");
    }
}

#[test]
fn second_process_reads_first_process_cache() {
    let dir = tempfile::tempdir().unwrap();
    let sentences = ["hello there", "general kenobi", "you are a bold one"];

    let first = EmbeddingCache::new(FsEmbeddingStore::new(dir.path()), CharEmbedder);
    let computed = first.get_or_compute("ep-42", &sentences).unwrap();

    let second = EmbeddingCache::new(FsEmbeddingStore::new(dir.path()), PanickingEmbedder);
    let loaded = second.get_or_compute("ep-42", &sentences).unwrap();

    assert_eq!(computed, loaded);
}

#[test]
fn corrupt_entry_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsEmbeddingStore::new(dir.path());
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(store.path_for("ep-1").unwrap(), b"not json").unwrap();

    let cache = EmbeddingCache::new(store, CharEmbedder);
    let vectors = cache.get_or_compute("ep-1", &["abc"]).unwrap();

    assert_eq!(vectors, vec![vec![3.0, 1.0]]);
    assert_eq!(cache.store().load("ep-1").unwrap(), vectors);
}

#[derive(Default)]
struct CountingEmbedder {
    calls: AtomicUsize,
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CharEmbedder.embed(text)
    }
}

struct CountingStore {
    inner: FsEmbeddingStore,
    saves: AtomicUsize,
}

impl EmbeddingStore for CountingStore {
    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        self.inner.exists(id)
    }

    fn load(&self, id: &str) -> Result<Vec<Vec<f32>>, StorageError> {
        self.inner.load(id)
    }

    fn save(&self, id: &str, vectors: &[Vec<f32>]) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(id, vectors)
    }
}

#[test]
fn concurrent_callers_embed_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = CountingStore {
        inner: FsEmbeddingStore::new(dir.path()),
        saves: AtomicUsize::new(0),
    };
    let cache = EmbeddingCache::new(store, CountingEmbedder::default());
    let sentences = ["one", "two", "three", "four"];

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| cache.get_or_compute("shared", &sentences).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.embedder().calls.load(Ordering::SeqCst), sentences.len());
    assert_eq!(cache.store().saves.load(Ordering::SeqCst), 1);
}
