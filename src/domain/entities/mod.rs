mod conversation;
mod document;
mod embedding;

pub use conversation::{ConversationTurn, TurnRole};
pub use document::{chunk_content, DocumentChunk, SearchResult};
pub use embedding::Embedding;
