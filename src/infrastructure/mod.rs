pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;

pub use config::{AppConfig, Config, ConfigError, PromptsConfig};
pub use embedding::{EmbeddingProvider, TextEmbedding};
pub use llm::{build_llm, AnthropicLlm, GeminiLlm};
pub use loader::WebPageLoader;
