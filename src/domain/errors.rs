use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("No page has been processed yet: {0}")]
    NotReady(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn ingestion(msg: impl Into<String>) -> Self {
        Self::Ingestion(msg.into())
    }

    pub fn retrieval(msg: impl Into<String>) -> Self {
        Self::Retrieval(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Re-tags a gateway failure as an ingestion failure, keeping the cause text.
    pub fn into_ingestion(self) -> Self {
        match self {
            Self::Ingestion(_) | Self::Validation(_) => self,
            other => Self::Ingestion(other.to_string()),
        }
    }

    pub fn into_retrieval(self) -> Self {
        match self {
            Self::Retrieval(_) => self,
            other => Self::Retrieval(other.to_string()),
        }
    }

    pub fn into_generation(self) -> Self {
        match self {
            Self::Generation(_) | Self::Timeout(_) => self,
            other => Self::Generation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
