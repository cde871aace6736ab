mod text;

pub use text::{EmbeddingProvider, TextEmbedding};
