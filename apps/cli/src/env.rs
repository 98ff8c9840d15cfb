use serde::Deserialize;

fn default_openai_base_url() -> String {
    hypr_openai::DEFAULT_BASE_URL.to_string()
}

fn default_openai_embedding_model() -> String {
    hypr_openai::DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_openai_chat_model() -> String {
    hypr_openai::DEFAULT_CHAT_MODEL.to_string()
}

fn default_hf_base_url() -> String {
    hypr_sentiment::DEFAULT_BASE_URL.to_string()
}

fn default_hf_sentiment_model() -> String {
    hypr_sentiment::DEFAULT_MODEL.to_string()
}

/// Service credentials and endpoints, read from the process environment
/// after an optional `.env` in the working directory.
#[derive(Debug, Deserialize)]
pub struct Env {
    pub openai_api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_openai_embedding_model")]
    pub openai_embedding_model: String,
    #[serde(default = "default_openai_chat_model")]
    pub openai_chat_model: String,

    pub hf_api_token: String,
    #[serde(default = "default_hf_base_url")]
    pub hf_base_url: String,
    #[serde(default = "default_hf_sentiment_model")]
    pub hf_sentiment_model: String,
}

impl Env {
    pub fn load() -> Result<Self, envy::Error> {
        let _ = dotenvy::dotenv();
        envy::from_env()
    }
}
