use crate::domain::{errors::DomainError, Embedding};
use async_trait::async_trait;

/// Embedding gateway: maps text to a fixed-dimension vector.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;

    /// Embeds every text in one call. Output order matches input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;

    fn dimension(&self) -> usize;
}
