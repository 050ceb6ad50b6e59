

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;


#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}


/// Source of pages and their outgoing links.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Resolves a user-supplied name (following redirects) to the page's canonical title.
    async fn canonical_title(&self, name: &str) -> Result<String, ContentError>;

    /// Outgoing links of an existing page, in backend order.
    async fn links(&self, title: &str) -> Result<Vec<String>, ContentError>;

    /// Plain-text introduction of a page. Empty when the page has none.
    async fn summary(&self, title: &str) -> Result<String, ContentError>;

    fn backend_name(&self) -> &str;
}


#[async_trait]
impl ContentBackend for Arc<dyn ContentBackend> {
    async fn canonical_title(&self, name: &str) -> Result<String, ContentError> {
        (**self).canonical_title(name).await
    }

    async fn links(&self, title: &str) -> Result<Vec<String>, ContentError> {
        (**self).links(title).await
    }

    async fn summary(&self, title: &str) -> Result<String, ContentError> {
        (**self).summary(title).await
    }

    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }
}
