

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::models::{Node, TargetText};
use crate::content::ContentBackend;
use crate::core::error::SearchError;
use crate::utils::normalize_title;


/// Neighbor discovery and name canonicalization over a [`ContentBackend`].
#[derive(Clone)]
pub struct LinkDiscovery {
    backend: Arc<dyn ContentBackend>,
}

impl LinkDiscovery {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    pub async fn canonicalize(&self, name: &str) -> Result<Node, SearchError> {
        let normalized = normalize_title(name);
        if normalized.is_empty() {
            return Err(SearchError::InvalidInput("page name is empty".to_string()));
        }
        Ok(self.backend.canonical_title(&normalized).await?)
    }

    /// Outgoing links of `node`, first occurrence kept, self-links dropped.
    pub async fn neighbors(&self, node: &str) -> Result<Vec<Node>, SearchError> {
        let links = self.backend.links(node).await?;
        let total = links.len();

        let mut seen = HashSet::with_capacity(total);
        let neighbors: Vec<Node> = links
            .into_iter()
            .filter(|link| link != node && seen.insert(link.clone()))
            .collect();

        debug!("{} -> {} neighbors ({} raw links)", node, neighbors.len(), total);
        Ok(neighbors)
    }

    /// Text embedded as the goal's target vector.
    pub async fn target_text(&self, goal: &str, mode: TargetText) -> Result<String, SearchError> {
        match mode {
            TargetText::Title => Ok(goal.to_string()),
            TargetText::Summary => {
                let summary = self.backend.summary(goal).await?;
                if summary.trim().is_empty() {
                    debug!("No summary for '{}', embedding the title instead", goal);
                    Ok(goal.to_string())
                } else {
                    Ok(summary)
                }
            }
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }
}
