use async_trait::async_trait;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingModel;
use rig::providers::{gemini, openai};

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    Gemini,
    OpenAi,
}

impl EmbeddingProvider {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(DomainError::validation(format!(
                "unsupported embedding provider: {other}"
            ))),
        }
    }
}

/// Embedding gateway backed by a hosted model through `rig`.
///
/// API keys are read from the environment (`GEMINI_API_KEY`, `OPENAI_API_KEY`).
pub struct TextEmbedding {
    provider: EmbeddingProvider,
    model: String,
    dimension: usize,
}

impl TextEmbedding {
    pub fn new() -> Self {
        Self {
            provider: EmbeddingProvider::Gemini,
            model: "embedding-001".to_string(),
            dimension: 768,
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, DomainError> {
        Ok(Self {
            provider: EmbeddingProvider::parse(&config.provider)?,
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }

    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Embedding>, DomainError> {
        let embeddings = match self.provider {
            EmbeddingProvider::Gemini => {
                let client = gemini::Client::from_env();
                client.embedding_model(&self.model).embed_texts(texts).await
            }
            EmbeddingProvider::OpenAi => {
                let client = openai::Client::from_env();
                client.embedding_model(&self.model).embed_texts(texts).await
            }
        }
        .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|emb| Embedding::from(emb.vec))
            .collect())
    }
}

impl Default for TextEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("cannot embed empty text"));
        }

        self.embed_texts(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::external("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(count = texts.len(), model = %self.model, "embedding batch");
        self.embed_texts(texts.iter().map(|t| t.to_string()).collect())
            .await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
