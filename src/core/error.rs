

use thiserror::Error;

use crate::content::ContentError;
use crate::embeddings::EmbeddingError;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Page not found: {0}")]
    NodeNotFound(String),

    #[error("Embedding backend error (status={}): {}", display_status(.status), .message)]
    EmbeddingBackend { status: Option<u16>, message: String },

    #[error("Content backend error: {0}")]
    ContentBackend(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No recorded path to {0}")]
    PathNotFound(String),
}

impl SearchError {
    pub fn embedding(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::EmbeddingBackend {
            status,
            message: message.into(),
        }
    }

    /// Status code reported by the failing backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::EmbeddingBackend { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ContentError> for SearchError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(name) => Self::NodeNotFound(name),
            other => Self::ContentBackend(other.to_string()),
        }
    }
}

impl From<EmbeddingError> for SearchError {
    fn from(err: EmbeddingError) -> Self {
        Self::EmbeddingBackend {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}


#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
