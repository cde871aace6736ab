//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! gateways. [`Session`] ties them into the ingest/ask lifecycle.

pub mod services;
pub mod session;

pub use services::{
    PipelineOrchestrator, PromptComposer, Reply, ReplyKind, ReplyPolicy, Retriever,
    ShortcutMatcher, ShortcutRule, VectorIndex, DEFAULT_TOP_K,
};
pub use session::{Gateways, IngestSummary, Session, SessionSettings};
