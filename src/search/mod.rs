

pub mod engine;
pub mod frontier;
pub mod heuristic;
pub mod links;
pub mod models;
pub mod path;
pub mod scoring;
pub mod similarity;

#[cfg(test)]
pub(crate) mod testing;


pub use models::{
    Embedding, ExhaustionReason, Node, PathStep, SearchConfig, SearchOutcome, SearchStats,
    SearchStrategy, TargetText,
};


pub use scoring::{heuristic_score, is_disambiguation, score_from_similarity, WORST_SCORE};
pub use similarity::cosine_similarity;


pub use engine::SearchEngine;
pub use frontier::Frontier;
pub use heuristic::{EvaluatorStats, HeuristicEvaluator};
pub use links::LinkDiscovery;
pub use path::reconstruct_path;
