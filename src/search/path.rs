

use std::collections::HashMap;

use super::models::{Node, PathStep};
use crate::core::error::SearchError;


/// Walks parent links from `goal` back to the start (the entry with no parent).
pub fn reconstruct_path(
    explored: &HashMap<Node, Option<Node>>,
    scores: &HashMap<Node, Option<f64>>,
    goal: &str,
) -> Result<Vec<PathStep>, SearchError> {
    let mut path = Vec::new();
    let mut current = goal;

    loop {
        let parent = explored
            .get(current)
            .ok_or_else(|| SearchError::PathNotFound(goal.to_string()))?;

        path.push(PathStep {
            node: current.to_string(),
            score: scores.get(current).copied().flatten(),
        });

        // A chain longer than the map itself means the parent links loop.
        if path.len() > explored.len() {
            return Err(SearchError::PathNotFound(goal.to_string()));
        }

        match parent {
            Some(parent) => current = parent.as_str(),
            None => break,
        }
    }

    path.reverse();
    Ok(path)
}
