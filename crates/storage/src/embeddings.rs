use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::fs::atomic_write;

const FORMAT_VERSION: u32 = 1;

/// Persistence for per-transcript sentence embeddings, keyed by transcript id.
pub trait EmbeddingStore: Send + Sync {
    fn exists(&self, id: &str) -> Result<bool, Error>;
    fn load(&self, id: &str) -> Result<Vec<Vec<f32>>, Error>;
    fn save(&self, id: &str, vectors: &[Vec<f32>]) -> Result<(), Error>;
}

impl<T: EmbeddingStore + ?Sized> EmbeddingStore for &T {
    fn exists(&self, id: &str) -> Result<bool, Error> {
        (**self).exists(id)
    }

    fn load(&self, id: &str) -> Result<Vec<Vec<f32>>, Error> {
        (**self).load(id)
    }

    fn save(&self, id: &str, vectors: &[Vec<f32>]) -> Result<(), Error> {
        (**self).save(id, vectors)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredEmbeddings {
    version: u32,
    transcript_id: String,
    vectors: Vec<Vec<f32>>,
}

/// One JSON file per transcript under `root`.
#[derive(Debug, Clone)]
pub struct FsEmbeddingStore {
    root: PathBuf,
}

impl FsEmbeddingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<user cache dir>/highlights/embeddings`.
    pub fn default_root() -> Result<PathBuf, Error> {
        dirs::cache_dir()
            .map(|dir| dir.join("highlights").join("embeddings"))
            .ok_or(Error::DataDirUnavailable)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> Result<PathBuf, Error> {
        Ok(self.root.join(format!("{}.json", file_stem(id)?)))
    }
}

impl EmbeddingStore for FsEmbeddingStore {
    fn exists(&self, id: &str) -> Result<bool, Error> {
        Ok(self.path_for(id)?.is_file())
    }

    fn load(&self, id: &str) -> Result<Vec<Vec<f32>>, Error> {
        let path = self.path_for(id)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let stored: StoredEmbeddings = serde_json::from_slice(&bytes)?;
        if stored.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                id: id.to_string(),
                found: stored.version,
                expected: FORMAT_VERSION,
            });
        }

        tracing::debug!(transcript_id = %id, path = %path.display(), vectors = stored.vectors.len(), "embeddings_loaded");
        Ok(stored.vectors)
    }

    fn save(&self, id: &str, vectors: &[Vec<f32>]) -> Result<(), Error> {
        let path = self.path_for(id)?;
        let stored = StoredEmbeddings {
            version: FORMAT_VERSION,
            transcript_id: id.to_string(),
            vectors: vectors.to_vec(),
        };
        let content = serde_json::to_vec(&stored)?;
        atomic_write(&path, &content)?;

        tracing::debug!(transcript_id = %id, path = %path.display(), vectors = vectors.len(), "embeddings_saved");
        Ok(())
    }
}

// Ids are opaque source identifiers; anything outside a conservative
// filename alphabet is hex-escaped so distinct ids never share a file.
fn file_stem(id: &str) -> Result<String, Error> {
    if id.is_empty() {
        return Err(Error::InvalidId(id.to_string()));
    }

    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => stem.push(byte as char),
            _ => stem.push_str(&format!("%{byte:02X}")),
        }
    }
    Ok(stem)
}

/// In-process store, for tests and runs with caching disabled.
#[derive(Debug, Default)]
pub struct MemoryEmbeddingStore {
    entries: Mutex<HashMap<String, Vec<Vec<f32>>>>,
}

impl MemoryEmbeddingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmbeddingStore for MemoryEmbeddingStore {
    fn exists(&self, id: &str) -> Result<bool, Error> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.contains_key(id))
    }

    fn load(&self, id: &str) -> Result<Vec<Vec<f32>>, Error> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        entries
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn save(&self, id: &str, vectors: &[Vec<f32>]) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(id.to_string(), vectors.to_vec());
        Ok(())
    }
}

fn poisoned() -> Error {
    Error::Io(std::io::Error::other("embedding store lock poisoned"))
}
