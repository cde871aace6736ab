mod document_loader;
mod embedding;
mod llm;

pub use document_loader::DocumentLoader;
pub use embedding::EmbeddingService;
pub use llm::LlmService;
