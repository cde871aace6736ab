use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Generation gateway: maps a composed prompt to natural-language text.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
