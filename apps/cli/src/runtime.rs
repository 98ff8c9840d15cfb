use std::path::PathBuf;

use hypr_openai::{OpenAiClient, OpenAiConfig};
use hypr_pipeline::Services;
use hypr_sentiment::{HfSentimentClient, HfSentimentConfig};
use hypr_storage::{EmbeddingStore, FsEmbeddingStore, MemoryEmbeddingStore};

use crate::env::Env;

/// Concrete services behind the pipeline's trait objects.
pub struct Runtime {
    openai: OpenAiClient,
    sentiment: HfSentimentClient,
    store: Box<dyn EmbeddingStore>,
}

impl Runtime {
    pub fn new(env: Env, cache_dir: Option<PathBuf>, no_cache: bool) -> Result<Self, hypr_storage::Error> {
        let mut openai = OpenAiConfig::new(env.openai_api_key);
        openai.base_url = env.openai_base_url;
        openai.embedding_model = env.openai_embedding_model;
        openai.chat_model = env.openai_chat_model;

        let mut sentiment = HfSentimentConfig::new(env.hf_api_token);
        sentiment.base_url = env.hf_base_url;
        sentiment.model = env.hf_sentiment_model;

        let store: Box<dyn EmbeddingStore> = if no_cache {
            Box::new(MemoryEmbeddingStore::new())
        } else {
            let root = match cache_dir {
                Some(dir) => dir,
                None => FsEmbeddingStore::default_root()?,
            };
            tracing::info!(cache_dir = %root.display(), "embedding_cache_configured");
            Box::new(FsEmbeddingStore::new(root))
        };

        Ok(Self {
            openai: OpenAiClient::new(openai),
            sentiment: HfSentimentClient::new(sentiment),
            store,
        })
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            embedder: &self.openai,
            store: self.store.as_ref(),
            sentiment: &self.sentiment,
            generator: &self.openai,
            validator: &self.openai,
        }
    }
}
