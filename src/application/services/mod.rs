pub mod index;
pub mod pipeline;
pub mod prompt;
pub mod reply;
pub mod retriever;
pub mod shortcut;

pub use index::{VectorIndex, DEFAULT_TOP_K};
pub use pipeline::PipelineOrchestrator;
pub use prompt::PromptComposer;
pub use reply::{Reply, ReplyKind, ReplyPolicy};
pub use retriever::Retriever;
pub use shortcut::{ShortcutMatcher, ShortcutRule};
