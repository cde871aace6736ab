use async_trait::async_trait;

use crate::domain::{errors::DomainError, DocumentChunk};

/// Turns a page URL into clean, ordered text chunks.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Vec<DocumentChunk>, DomainError>;
}
