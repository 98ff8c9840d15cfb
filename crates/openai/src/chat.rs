use askama::Template;
use hypr_highlight_interface::{GenerationOracle, GenerationRequest, ValidationOracle};

use crate::client::OpenAiClient;
use crate::error::Error;
use crate::parse::parse_index_list;
use crate::prompts::{GenerationPrompt, SYSTEM_PROMPT, ValidationPrompt};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, Role};

impl OpenAiClient {
    /// Single-turn chat completion; returns the first choice's text.
    pub fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String, Error> {
        let request = ChatRequest {
            model: &self.config().chat_model,
            temperature,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system,
                },
                ChatMessage {
                    role: Role::User,
                    content: user,
                },
            ],
        };
        let response: ChatResponse = self.post_json("chat/completions", &request)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(Error::EmptyResponse("completion"))
    }

    pub fn pick_sentences(&self, request: &GenerationRequest<'_>) -> Result<Vec<usize>, Error> {
        let prompt = GenerationPrompt::from_request(request).render()?;
        let reply = self.complete(SYSTEM_PROMPT, &prompt, self.config().generation_temperature)?;
        tracing::debug!(anchor = request.anchor, reply = %reply, "generation_reply");
        parse_index_list(&reply)
    }

    pub fn pick_scripts(&self, scripts: &[String], desired: usize) -> Result<Vec<usize>, Error> {
        let prompt = ValidationPrompt { desired, scripts }.render()?;
        let reply = self.complete(SYSTEM_PROMPT, &prompt, self.config().validation_temperature)?;
        tracing::debug!(scripts = scripts.len(), desired, reply = %reply, "validation_reply");
        parse_index_list(&reply)
    }
}

impl GenerationOracle for OpenAiClient {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<Vec<usize>, hypr_highlight_interface::Error> {
        Ok(self.pick_sentences(request)?)
    }
}

impl ValidationOracle for OpenAiClient {
    fn validate(
        &self,
        scripts: &[String],
        desired: usize,
    ) -> Result<Vec<usize>, hypr_highlight_interface::Error> {
        Ok(self.pick_scripts(scripts, desired)?)
    }
}
