use async_trait::async_trait;
use std::sync::Arc;

use page_chat::api::{create_router, AppState};
use page_chat::application::{Gateways, Session, SessionSettings};
use page_chat::domain::ports::{DocumentLoader, EmbeddingService, LlmService};
use page_chat::domain::{DocumentChunk, DomainError, Embedding};
use page_chat::infrastructure::AppConfig;

/// One dimension per known keyword.
const VOCABULARY: [&str; 6] = ["paris", "france", "berlin", "germany", "capital", "city"];

pub struct VocabularyEmbedding;

impl VocabularyEmbedding {
    fn vectorize(text: &str) -> Embedding {
        let lower = text.to_lowercase();
        let mut vec: Vec<f32> = VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        // keeps unrelated text away from the zero vector
        vec.push(0.1);
        Embedding::new(vec)
    }
}

#[async_trait]
impl EmbeddingService for VocabularyEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        VOCABULARY.len() + 1
    }
}

/// Answers with the first context paragraph of the prompt.
pub struct FirstChunkLlm;

#[async_trait]
impl LlmService for FirstChunkLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let context = prompt
            .split_once("context:\n")
            .map(|(_, rest)| rest)
            .unwrap_or(prompt);
        Ok(context.split("\n\n").next().unwrap_or_default().to_string())
    }
}

pub struct FailingLlm;

#[async_trait]
impl LlmService for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::external("upstream 500"))
    }
}

/// Serves capitals for any URL containing "capitals", 404 otherwise.
pub struct CapitalsLoader;

#[async_trait]
impl DocumentLoader for CapitalsLoader {
    async fn load(&self, url: &str) -> Result<Vec<DocumentChunk>, DomainError> {
        if !url.contains("capitals") {
            return Err(DomainError::ingestion(format!("{url} returned 404 Not Found")));
        }
        Ok(vec![
            DocumentChunk::new(url, "Paris is the capital of France.", 0),
            DocumentChunk::new(url, "Berlin is the capital of Germany.", 1),
        ])
    }
}

pub fn app_with(llm: Arc<dyn LlmService>) -> axum::Router {
    let gateways = Gateways::new(Arc::new(CapitalsLoader), Arc::new(VocabularyEmbedding), llm);
    let session = Session::new(gateways, SessionSettings::default());
    create_router(AppState::new(session, AppConfig::default()))
}

pub fn app() -> axum::Router {
    app_with(Arc::new(FirstChunkLlm))
}
