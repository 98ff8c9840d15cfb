use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};
use hypr_highlight_interface::{SentimentClassifier, SentimentScores};
use ureq::Agent;

use crate::error::Error;
use crate::types::{ClassifyOptions, ClassifyRequest, ClassifyResponse, error_message, to_scores};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";

#[derive(Debug, Clone)]
pub struct HfSentimentConfig {
    pub api_token: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub num_retries: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl HfSentimentConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            num_retries: 4,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HfSentimentClient {
    agent: Agent,
    config: HfSentimentConfig,
}

impl HfSentimentClient {
    pub fn new(config: HfSentimentConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &HfSentimentConfig {
        &self.config
    }

    pub fn classify_text(&self, text: &str) -> Result<SentimentScores, Error> {
        let backoff = ExponentialBuilder::default()
            .with_jitter()
            .with_min_delay(self.config.min_delay)
            .with_max_delay(self.config.max_delay)
            .with_max_times(self.config.num_retries);

        let response = (|| self.classify_once(text))
            .retry(backoff)
            .sleep(std::thread::sleep)
            .when(Error::is_retryable)
            .notify(|err, dur| {
                tracing::warn!(
                    model = %self.config.model,
                    error = %err,
                    retry_delay_ms = dur.as_millis(),
                    "retrying_sentiment_request"
                );
            })
            .call()?;

        to_scores(&response.into_labels())
    }

    fn classify_once(&self, text: &str) -> Result<ClassifyResponse, Error> {
        let url = format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let request = ClassifyRequest {
            inputs: text,
            options: ClassifyOptions {
                wait_for_model: true,
            },
        };

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_token))
            .send_json(&request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response.body_mut().read_json::<ClassifyResponse>()?)
    }
}

impl SentimentClassifier for HfSentimentClient {
    fn classify(&self, text: &str) -> Result<SentimentScores, hypr_highlight_interface::Error> {
        self.classify_text(text)
            .map_err(hypr_highlight_interface::Error::sentiment)
    }
}
