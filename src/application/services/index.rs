use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::EmbeddingService, DocumentChunk, DomainError, Embedding, SearchResult,
};

/// Number of chunks handed to the prompt for every question.
pub const DEFAULT_TOP_K: usize = 3;

/// Embedded chunks of one ingested page, queryable by cosine similarity.
///
/// An index is immutable once built. Re-ingesting a page builds a new index
/// and the old one is dropped with the binding that owned it.
pub struct VectorIndex {
    embedding: Arc<dyn EmbeddingService>,
    source: String,
    entries: Vec<(DocumentChunk, Embedding)>,
}

impl VectorIndex {
    /// Embeds `chunks` in one batched gateway call.
    ///
    /// Fails with [`DomainError::Ingestion`] when there is nothing to embed, a
    /// chunk is blank, or the gateway fails or returns a mismatched batch.
    #[instrument(skip(embedding, chunks), fields(count = chunks.len()))]
    pub async fn build(
        embedding: Arc<dyn EmbeddingService>,
        chunks: Vec<DocumentChunk>,
    ) -> Result<Self, DomainError> {
        let Some(first) = chunks.first() else {
            return Err(DomainError::ingestion("the page has no text to index"));
        };
        let source = first.source.clone();

        if let Some(blank) = chunks.iter().find(|c| c.content.trim().is_empty()) {
            return Err(DomainError::ingestion(format!(
                "chunk {} has no content",
                blank.chunk_index
            )));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = embedding
            .embed_batch(&texts)
            .await
            .map_err(DomainError::into_ingestion)?;

        if embeddings.len() != chunks.len() {
            return Err(DomainError::ingestion(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }
        if embeddings.iter().any(Embedding::is_empty) {
            return Err(DomainError::ingestion("embedding service returned an empty vector"));
        }

        tracing::debug!(
            source = %source,
            dimension = embeddings[0].dimension(),
            expected = embedding.dimension(),
            "index built"
        );
        Ok(Self {
            embedding,
            source,
            entries: chunks.into_iter().zip(embeddings).collect(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns at most `top_k` chunks, most similar first. Equal scores keep
    /// their original chunk order.
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::retrieval("the index is empty"));
        }

        let query = self
            .embedding
            .embed(query)
            .await
            .map_err(DomainError::into_retrieval)?;

        Ok(rank(&self.entries, &query, top_k))
    }
}

fn rank(entries: &[(DocumentChunk, Embedding)], query: &Embedding, top_k: usize) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = entries
        .iter()
        .map(|(chunk, embedding)| SearchResult {
            chunk: chunk.clone(),
            score: query.cosine_similarity(embedding),
        })
        .collect();

    // stable: ties stay in chunk order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);
    results
}
