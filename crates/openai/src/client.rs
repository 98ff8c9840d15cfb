use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::Error;
use crate::types::error_message;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_NUM_RETRIES: usize = 3;
const DEFAULT_MIN_DELAY_MS: u64 = 500;
const DEFAULT_MAX_DELAY_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub num_retries: usize,
    pub min_delay_ms: u64,
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            num_retries: DEFAULT_NUM_RETRIES,
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub generation_temperature: f32,
    pub validation_temperature: f32,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
            generation_temperature: 0.5,
            validation_temperature: 1.0,
        }
    }
}

/// Blocking client for an OpenAI-compatible API. Cheap to share across
/// threads; the underlying agent pools connections.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    agent: Agent,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub(crate) fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let retry = &self.config.retry;
        let backoff = ExponentialBuilder::default()
            .with_jitter()
            .with_min_delay(Duration::from_millis(retry.min_delay_ms))
            .with_max_delay(Duration::from_secs(retry.max_delay_secs))
            .with_max_times(retry.num_retries);

        (|| self.post_once(&url, body))
            .retry(backoff)
            .sleep(std::thread::sleep)
            .when(Error::is_retryable)
            .notify(|err, dur| {
                tracing::warn!(
                    path,
                    error = %err,
                    retry_delay_ms = dur.as_millis(),
                    "retrying_openai_request"
                );
            })
            .call()
    }

    fn post_once<B, R>(&self, url: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let mut response = self
            .agent
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send_json(body)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response.body_mut().read_json::<R>()?)
    }
}
