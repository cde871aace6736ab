use std::sync::Arc;
use tracing::instrument;

use crate::application::services::{prompt::PromptComposer, retriever::Retriever};
use crate::domain::{ports::LlmService, DomainError};

/// Retrieve, compose, generate, trim: one question against one ingested page.
///
/// Only constructed from a successfully built index, so holding one means the
/// session is bound.
#[derive(Clone)]
pub struct PipelineOrchestrator {
    retriever: Retriever,
    composer: Arc<PromptComposer>,
    llm: Arc<dyn LlmService>,
}

impl PipelineOrchestrator {
    pub fn new(retriever: Retriever, composer: Arc<PromptComposer>, llm: Arc<dyn LlmService>) -> Self {
        Self {
            retriever,
            composer,
            llm,
        }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Returns the trimmed generated text, which may be empty.
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn invoke(&self, question: &str) -> Result<String, DomainError> {
        let results = self.retriever.retrieve(question).await?;
        let context: Vec<&str> = results.iter().map(|r| r.chunk.content.as_str()).collect();

        let prompt = self.composer.compose(&context, question);
        tracing::debug!(prompt_len = prompt.len(), chunks = context.len(), "prompt composed");

        let answer = self
            .llm
            .complete(&prompt)
            .await
            .map_err(DomainError::into_generation)?;

        Ok(answer.trim().to_string())
    }
}
