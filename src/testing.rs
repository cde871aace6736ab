//! Deterministic gateway fakes shared by unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::ports::{DocumentLoader, EmbeddingService, LlmService};
use crate::domain::{DocumentChunk, DomainError, Embedding};

const DIMENSION: usize = 256;

/// Bag-of-words embedding: each lower-cased word bumps one hashed bucket.
#[derive(Default)]
pub struct KeywordEmbedding {
    pub batch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
}

impl KeywordEmbedding {
    pub fn vectorize(text: &str) -> Embedding {
        let mut vec = vec![0.0f32; DIMENSION];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            vec[bucket(&word.to_lowercase())] += 1.0;
        }
        Embedding::new(vec)
    }
}

fn bucket(word: &str) -> usize {
    // FNV-1a
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % DIMENSION as u64) as usize
}

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }
}

/// Embedding gateway that fails on the configured call kinds.
pub struct FailingEmbedding {
    pub fail_batch: bool,
    pub fail_single: bool,
}

#[async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        if self.fail_single {
            return Err(DomainError::external("embedding endpoint unreachable"));
        }
        Ok(KeywordEmbedding::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if self.fail_batch {
            return Err(DomainError::external("embedding endpoint unreachable"));
        }
        Ok(texts.iter().map(|t| KeywordEmbedding::vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }
}

/// Answers with the prompt it received and keeps every prompt.
#[derive(Default)]
pub struct EchoLlm {
    pub prompts: Mutex<Vec<String>>,
}

impl EchoLlm {
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(prompt.to_string())
    }
}

/// Always answers with the same text.
pub struct ScriptedLlm(pub String);

#[async_trait]
impl LlmService for ScriptedLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Ok(self.0.clone())
    }
}

pub struct FailingLlm;

#[async_trait]
impl LlmService for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::external("model overloaded"))
    }
}

/// Serves fixed paragraphs for any URL.
pub struct StaticLoader {
    paragraphs: Vec<String>,
    pub calls: AtomicUsize,
}

impl StaticLoader {
    pub fn new<S: Into<String>>(paragraphs: impl IntoIterator<Item = S>) -> Self {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentLoader for StaticLoader {
    async fn load(&self, url: &str) -> Result<Vec<DocumentChunk>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .paragraphs
            .iter()
            .enumerate()
            .map(|(i, p)| DocumentChunk::new(url, p.as_str(), i))
            .collect())
    }
}

pub struct FailingLoader;

#[async_trait]
impl DocumentLoader for FailingLoader {
    async fn load(&self, url: &str) -> Result<Vec<DocumentChunk>, DomainError> {
        Err(DomainError::external(format!("GET {url} returned 404")))
    }
}

pub fn chunks(source: &str, texts: &[&str]) -> Vec<DocumentChunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| DocumentChunk::new(source, *t, i))
        .collect()
}
