//! Mock LLM client for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::translator::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the [`LlmClient`] trait.
///
/// Replies with a canned string and records the requests it receives.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    reply: Mutex<Option<String>>,
    fail: Mutex<bool>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = Some(reply.to_string());
    }

    pub fn fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        if *self.fail.lock().unwrap() {
            return Err(LlmError::Api {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        let text = self
            .reply
            .lock()
            .unwrap()
            .clone()
            .ok_or(LlmError::NotConfigured)?;
        Ok(CompletionResponse {
            text,
            usage: LlmUsage::default(),
            model: "mock-model".to_string(),
        })
    }
}
