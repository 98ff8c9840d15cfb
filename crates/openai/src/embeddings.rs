use hypr_highlight_interface::{Embedder, Embedding};

use crate::client::OpenAiClient;
use crate::error::Error;
use crate::types::{EmbeddingRequest, EmbeddingResponse};

impl OpenAiClient {
    pub fn create_embedding(&self, text: &str) -> Result<Embedding, Error> {
        let request = EmbeddingRequest {
            model: &self.config().embedding_model,
            input: text,
        };
        let response: EmbeddingResponse = self.post_json("embeddings", &request)?;

        response
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
            .ok_or(Error::EmptyResponse("embedding"))
    }
}

impl Embedder for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Embedding, hypr_highlight_interface::Error> {
        self.create_embedding(text)
            .map_err(hypr_highlight_interface::Error::embedding)
    }
}
