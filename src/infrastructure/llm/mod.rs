mod anthropic;
mod gemini;

use std::sync::Arc;
use std::time::Duration;

pub use anthropic::AnthropicLlm;
pub use gemini::GeminiLlm;

use crate::domain::{ports::LlmService, DomainError};
use crate::infrastructure::config::LlmConfig;

/// Picks the generation gateway named by `llm.provider`.
pub fn build_llm(config: &LlmConfig) -> Result<Arc<dyn LlmService>, DomainError> {
    let timeout = Duration::from_secs(config.timeout_seconds.max(1));
    match config.provider.trim().to_ascii_lowercase().as_str() {
        "gemini" | "google" => Ok(Arc::new(
            GeminiLlm::new(&config.model).with_timeout(timeout),
        )),
        "anthropic" => Ok(Arc::new(
            AnthropicLlm::new(&config.model).with_timeout(timeout),
        )),
        other => Err(DomainError::validation(format!(
            "unsupported llm provider: {other}"
        ))),
    }
}
