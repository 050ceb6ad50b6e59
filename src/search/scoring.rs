

use lazy_static::lazy_static;
use regex::Regex;


/// Score given to candidates that should be expanded last.
pub const WORST_SCORE: f64 = 1.0;


/// Frontier priority of the start node. Never recorded as a score.
pub const START_PRIORITY: f64 = 0.0;

lazy_static! {
    static ref DISAMBIGUATION: Regex =
        Regex::new(r"(?i)\((?:[^()]*\s)?disambiguation\)\s*$").unwrap();
}


pub fn is_disambiguation(title: &str) -> bool {
    DISAMBIGUATION.is_match(title)
}


/// `1 - similarity`: in [0, 1], lower is closer to the goal.
pub fn score_from_similarity(similarity: f64) -> f64 {
    (1.0 - similarity).clamp(0.0, WORST_SCORE)
}


/// Frontier score for a candidate; disambiguation pages always rank worst.
pub fn heuristic_score(title: &str, similarity: f64) -> f64 {
    if is_disambiguation(title) {
        return WORST_SCORE;
    }
    score_from_similarity(similarity)
}
