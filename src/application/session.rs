use std::sync::Arc;
use tracing::instrument;

use crate::application::services::{
    PipelineOrchestrator, PromptComposer, Reply, ReplyKind, ReplyPolicy, Retriever,
    ShortcutMatcher, VectorIndex, DEFAULT_TOP_K,
};
use crate::domain::{
    ports::{DocumentLoader, EmbeddingService, LlmService},
    ConversationTurn, DomainError, SearchResult,
};

/// External capabilities a session needs to ingest pages and answer questions.
#[derive(Clone)]
pub struct Gateways {
    pub loader: Arc<dyn DocumentLoader>,
    pub embedding: Arc<dyn EmbeddingService>,
    pub llm: Arc<dyn LlmService>,
}

impl Gateways {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
    ) -> Self {
        Self {
            loader,
            embedding,
            llm,
        }
    }
}

/// Behaviour knobs shared by every binding of a session.
#[derive(Clone)]
pub struct SessionSettings {
    pub top_k: usize,
    pub composer: Arc<PromptComposer>,
    pub shortcuts: ShortcutMatcher,
    pub replies: ReplyPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            composer: Arc::new(PromptComposer::default()),
            shortcuts: ShortcutMatcher::default(),
            replies: ReplyPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub source: String,
    pub chunks: usize,
}

/// The index and the pipeline built over it always come and go together.
struct Binding {
    index: Arc<VectorIndex>,
    pipeline: PipelineOrchestrator,
}

/// One user's chat about one page.
///
/// A session starts unbound. [`Session::ingest`] binds it to a page; a later
/// ingest replaces the binding and clears the history in the same step.
pub struct Session {
    gateways: Gateways,
    settings: SessionSettings,
    binding: Option<Binding>,
    history: Vec<ConversationTurn>,
}

impl Session {
    pub fn new(gateways: Gateways, settings: SessionSettings) -> Self {
        Self {
            gateways,
            settings,
            binding: None,
            history: Vec::new(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.index.source())
    }

    pub fn chunk_count(&self) -> usize {
        self.binding.as_ref().map_or(0, |b| b.index.len())
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Loads, embeds and binds `url`.
    ///
    /// A blank URL is rejected without touching the session. Once loading
    /// starts, a failure leaves the session unbound with an empty history.
    #[instrument(skip(self))]
    pub async fn ingest(&mut self, url: &str) -> Result<IngestSummary, DomainError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DomainError::validation("Please enter a valid URL."));
        }

        let binding = match self.bind(url).await {
            Ok(binding) => binding,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };
        let summary = IngestSummary {
            source: binding.index.source().to_string(),
            chunks: binding.index.len(),
        };

        self.binding = Some(binding);
        self.history.clear();

        tracing::info!(source = %summary.source, chunks = summary.chunks, "page processed");
        Ok(summary)
    }

    /// Answers one question and records the exchange.
    ///
    /// Social messages get a canned reply even before any page is processed.
    /// Anything else needs a bound session and fails with
    /// [`DomainError::NotReady`] otherwise, in which case no turn is recorded.
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn ask(&mut self, question: &str) -> Result<Reply, DomainError> {
        if let Some(reply) = self.settings.shortcuts.reply_for(question) {
            let reply = Reply::new(reply, ReplyKind::Shortcut);
            self.record(question, &reply.text);
            return Ok(reply);
        }

        let binding = self
            .binding
            .as_ref()
            .ok_or_else(|| DomainError::not_ready("process a page before asking questions"))?;

        let outcome = binding.pipeline.invoke(question).await;
        let reply = self.settings.replies.resolve(outcome);
        self.record(question, &reply.text);
        Ok(reply)
    }

    /// Raw retrieval results for `query` against the bound page.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        let binding = self
            .binding
            .as_ref()
            .ok_or_else(|| DomainError::not_ready("process a page before searching"))?;
        binding.pipeline.retriever().retrieve(query).await
    }

    /// Drops the binding and the history.
    pub fn reset(&mut self) {
        self.binding = None;
        self.history.clear();
        tracing::info!("session reset");
    }

    async fn bind(&self, url: &str) -> Result<Binding, DomainError> {
        let chunks = self
            .gateways
            .loader
            .load(url)
            .await
            .map_err(DomainError::into_ingestion)?;
        let index = Arc::new(VectorIndex::build(self.gateways.embedding.clone(), chunks).await?);

        let pipeline = PipelineOrchestrator::new(
            Retriever::new(index.clone(), self.settings.top_k),
            self.settings.composer.clone(),
            self.gateways.llm.clone(),
        );
        Ok(Binding { index, pipeline })
    }

    fn record(&mut self, question: &str, answer: &str) {
        self.history.push(ConversationTurn::user(question));
        self.history.push(ConversationTurn::assistant(answer));
    }
}
