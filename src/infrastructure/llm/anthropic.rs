use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::anthropic;
use std::time::Duration;

use crate::domain::{ports::LlmService, DomainError};

/// Generation gateway for Anthropic models. Reads `ANTHROPIC_API_KEY`.
pub struct AnthropicLlm {
    model: String,
    timeout: Duration,
}

impl AnthropicLlm {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmService for AnthropicLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let client = anthropic::Client::from_env();
        let agent = client.agent(&self.model).build();

        tokio::time::timeout(self.timeout, agent.prompt(prompt))
            .await
            .map_err(|_| DomainError::timeout("Anthropic completion timed out"))?
            .map_err(|e| DomainError::generation(e.to_string()))
    }
}
