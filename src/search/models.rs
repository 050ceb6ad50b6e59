

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString, IntoStaticStr};


/// Canonical page title.
pub type Node = String;


pub type Embedding = Vec<f32>;


#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchStrategy {
    /// Best-first, ranked by embedding similarity to the goal.
    #[default]
    Guided,
    /// Plain breadth-first order; no embedding calls.
    BreadthFirst,
}


/// What gets embedded as the goal's target vector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetText {
    #[default]
    Summary,
    Title,
}


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    pub target_text: TargetText,
    /// Upper bound on nodes claimed during one search (start excluded).
    pub max_discovered: Option<usize>,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub node: Node,
    /// `None` for the start node, which is never scored.
    pub score: Option<f64>,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExhaustionReason {
    FrontierEmpty,
    DiscoveryLimit,
}


#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    pub expanded: usize,
    pub discovered: usize,
    pub neighbor_calls: usize,
    pub embedding_batches: usize,
    pub expansion_order: Vec<Node>,
    pub elapsed: Duration,
}


#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found {
        path: Vec<PathStep>,
        stats: SearchStats,
    },
    Exhausted {
        reason: ExhaustionReason,
        stats: SearchStats,
    },
    Cancelled {
        stats: SearchStats,
    },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn path(&self) -> Option<&[PathStep]> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Node titles of the found path, start first.
    pub fn nodes(&self) -> Option<Vec<&str>> {
        self.path()
            .map(|steps| steps.iter().map(|s| s.node.as_str()).collect())
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Found { stats, .. }
            | Self::Exhausted { stats, .. }
            | Self::Cancelled { stats } => stats,
        }
    }
}
