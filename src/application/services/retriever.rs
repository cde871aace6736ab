use std::sync::Arc;
use tracing::instrument;

use crate::application::services::index::VectorIndex;
use crate::domain::{DomainError, SearchResult};

/// Fixed-k view over one [`VectorIndex`].
#[derive(Clone)]
pub struct Retriever {
    index: Arc<VectorIndex>,
    top_k: usize,
}

impl Retriever {
    pub fn new(index: Arc<VectorIndex>, top_k: usize) -> Self {
        Self {
            index,
            top_k: top_k.max(1),
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[instrument(skip(self), fields(top_k = self.top_k))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        let results = self.index.search(query, self.top_k).await?;
        tracing::debug!(hits = results.len(), "retrieved context");
        Ok(results)
    }
}
