//! Natural-language command to structured intent, via an external
//! text-generation service.

mod llm;
mod prompt;

pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage,
    OllamaClient,
};
pub use prompt::build_instructions;

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::debug;

use crate::intent::{parse_intent, IntentError, StructuredIntent};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Translator contract violation: {0}")]
    Contract(#[from] IntentError),
}

/// Turns one command string into one validated [`StructuredIntent`].
pub struct IntentTranslator {
    client: Arc<dyn LlmClient>,
    instructions: String,
}

impl IntentTranslator {
    pub fn new(client: Arc<dyn LlmClient>, zone_names: &[String], default_zone: &str) -> Self {
        Self {
            client,
            instructions: build_instructions(zone_names, default_zone),
        }
    }

    pub async fn translate(&self, command: &str) -> Result<StructuredIntent, TranslateError> {
        let request = CompletionRequest::new(format!("USER COMMAND: {}", command))
            .with_system(self.instructions.clone());

        let response = self.client.complete(request).await?;
        let body = strip_code_fences(&response.text);
        debug!(
            provider = self.client.provider(),
            model = self.client.model(),
            "Translator reply: {}",
            body
        );

        Ok(parse_intent(body)?)
    }
}

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("fence regex")
});

/// Models wrap JSON replies in markdown code fences often enough that the
/// contract tolerates it; anything beyond that is the parser's problem.
pub fn strip_code_fences(text: &str) -> &str {
    match FENCE.captures(text) {
        Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(text),
        None => text.trim(),
    }
}
