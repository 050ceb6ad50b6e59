

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::frontier::Frontier;
use super::heuristic::HeuristicEvaluator;
use super::links::LinkDiscovery;
use super::models::{
    Embedding, ExhaustionReason, Node, SearchConfig, SearchOutcome, SearchStats, SearchStrategy,
};
use super::path::reconstruct_path;
use super::scoring::START_PRIORITY;
use crate::core::error::SearchError;


/// Per-invocation bookkeeping; dropped when the search ends.
struct SearchState {
    frontier: Frontier,
    explored: HashMap<Node, Option<Node>>,
    scores: HashMap<Node, Option<f64>>,
    stats: SearchStats,
}

impl SearchState {
    fn seeded(start: &str) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(START_PRIORITY, start.to_string());

        let mut explored = HashMap::new();
        explored.insert(start.to_string(), None);
        let mut scores = HashMap::new();
        scores.insert(start.to_string(), None);

        Self {
            frontier,
            explored,
            scores,
            stats: SearchStats::default(),
        }
    }

    fn claim(&mut self, node: Node, parent: &str, score: f64) {
        self.explored.insert(node.clone(), Some(parent.to_string()));
        self.scores.insert(node.clone(), Some(score));
        self.frontier.push(score, node);
        self.stats.discovered += 1;
    }
}


/// Best-first search from a start page to a goal page.
pub struct SearchEngine {
    links: LinkDiscovery,
    evaluator: Option<HeuristicEvaluator>,
    config: SearchConfig,
}

impl SearchEngine {
    /// A guided search needs an evaluator; breadth-first ignores it.
    pub fn new(
        links: LinkDiscovery,
        evaluator: Option<HeuristicEvaluator>,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        if config.strategy == SearchStrategy::Guided && evaluator.is_none() {
            return Err(SearchError::InvalidInput(
                "guided search requires a heuristic evaluator".to_string(),
            ));
        }

        info!(
            "SearchEngine initialized: strategy={}, content={}, embeddings={}, max_discovered={:?}",
            config.strategy,
            links.backend_name(),
            evaluator.as_ref().map_or("none", |e| e.provider_name()),
            config.max_discovered
        );

        Ok(Self {
            links,
            evaluator,
            config,
        })
    }

    pub fn breadth_first(links: LinkDiscovery, max_discovered: Option<usize>) -> Self {
        Self {
            links,
            evaluator: None,
            config: SearchConfig {
                strategy: SearchStrategy::BreadthFirst,
                max_discovered,
                ..Default::default()
            },
        }
    }

    pub async fn search(&self, start: &str, goal: &str) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(start, goal, &CancellationToken::new())
            .await
    }

    pub async fn search_with_cancel(
        &self,
        start: &str,
        goal: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let span = info_span!(
            "search",
            search_id = %Uuid::new_v4(),
            start = %start,
            goal = %goal,
            strategy = %self.config.strategy
        );

        let result = self.run(start, goal, cancel).instrument(span.clone()).await;
        if let Err(ref e) = result {
            span.in_scope(|| warn!("Search aborted: {}", e));
        }
        result
    }

    async fn run(
        &self,
        start: &str,
        goal: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();

        let start = self.links.canonicalize(start).await?;
        let goal = self.links.canonicalize(goal).await?;
        info!("Searching for a path from '{}' to '{}'", start, goal);

        let target = if start == goal {
            None
        } else {
            match until_cancelled(cancel, self.target_vector(&goal)).await? {
                Some(target) => target,
                None => return Ok(Self::cancelled(SearchStats::default(), started)),
            }
        };

        let mut state = SearchState::seeded(&start);

        loop {
            if cancel.is_cancelled() {
                return Ok(Self::cancelled(state.stats, started));
            }

            let Some((priority, node)) = state.frontier.pop() else {
                info!(
                    "Frontier exhausted after {} expansions, {} discovered",
                    state.stats.expanded, state.stats.discovered
                );
                return Ok(SearchOutcome::Exhausted {
                    reason: ExhaustionReason::FrontierEmpty,
                    stats: Self::finish(state.stats, started),
                });
            };

            state.stats.expanded += 1;
            state.stats.expansion_order.push(node.clone());

            if node == goal {
                return Self::found(state, &goal, started);
            }

            debug!(
                "Expanding '{}' (priority {:.4}, frontier {})",
                node,
                priority,
                state.frontier.len()
            );

            let fetch = self.links.neighbors(&node);
            let Some(neighbors) = until_cancelled(cancel, fetch).await? else {
                return Ok(Self::cancelled(state.stats, started));
            };
            state.stats.neighbor_calls += 1;

            let mut fresh: Vec<Node> = neighbors
                .into_iter()
                .filter(|n| !state.explored.contains_key(n))
                .collect();
            if fresh.is_empty() {
                continue;
            }

            let mut budget_spent = false;
            if let Some(limit) = self.config.max_discovered {
                let remaining = limit.saturating_sub(state.stats.discovered);
                if fresh.len() > remaining {
                    info!(
                        "Discovery limit of {} reached ({} discovered, {} more offered)",
                        limit,
                        state.stats.discovered,
                        fresh.len()
                    );
                    fresh = within_budget(fresh, &goal, remaining);
                    budget_spent = true;
                }
            }

            let scoring = self.score(&fresh, target.as_deref(), &mut state.stats);
            let Some(scores) = until_cancelled(cancel, scoring).await? else {
                return Ok(Self::cancelled(state.stats, started));
            };
            for (candidate, score) in fresh.into_iter().zip(scores) {
                tracing::trace!("  {} -> {:.4}", candidate, score);
                state.claim(candidate, &node, score);
            }

            if budget_spent {
                // Claimed goals already have a complete parent chain.
                if state.explored.contains_key(&goal) {
                    return Self::found(state, &goal, started);
                }
                return Ok(SearchOutcome::Exhausted {
                    reason: ExhaustionReason::DiscoveryLimit,
                    stats: Self::finish(state.stats, started),
                });
            }
        }
    }

    fn found(
        state: SearchState,
        goal: &str,
        started: Instant,
    ) -> Result<SearchOutcome, SearchError> {
        let path = reconstruct_path(&state.explored, &state.scores, goal)?;
        info!(
            "Found path of {} pages after {} expansions",
            path.len(),
            state.stats.expanded
        );
        Ok(SearchOutcome::Found {
            path,
            stats: Self::finish(state.stats, started),
        })
    }

    fn cancelled(stats: SearchStats, started: Instant) -> SearchOutcome {
        info!("Search cancelled after {} expansions", stats.expanded);
        SearchOutcome::Cancelled {
            stats: Self::finish(stats, started),
        }
    }

    async fn target_vector(&self, goal: &str) -> Result<Option<Embedding>, SearchError> {
        let Some(evaluator) = self.guided_evaluator() else {
            return Ok(None);
        };

        let text = self.links.target_text(goal, self.config.target_text).await?;
        debug!("Target text for '{}': {}", goal, crate::truncate_for_log(&text, 80));
        Ok(Some(evaluator.embed_one(&text).await?))
    }

    async fn score(
        &self,
        candidates: &[Node],
        target: Option<&[f32]>,
        stats: &mut SearchStats,
    ) -> Result<Vec<f64>, SearchError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        match (self.guided_evaluator(), target) {
            (Some(evaluator), Some(target)) => {
                stats.embedding_batches += 1;
                evaluator.score_candidates(candidates, target).await
            }
            // Equal scores leave the frontier in FIFO order.
            _ => Ok(vec![START_PRIORITY; candidates.len()]),
        }
    }

    fn guided_evaluator(&self) -> Option<&HeuristicEvaluator> {
        match self.config.strategy {
            SearchStrategy::Guided => self.evaluator.as_ref(),
            SearchStrategy::BreadthFirst => None,
        }
    }

    fn finish(mut stats: SearchStats, started: Instant) -> SearchStats {
        stats.elapsed = started.elapsed();
        stats
    }

}


/// Resolves to `None` once `cancel` fires, dropping the in-flight call.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, SearchError>>,
) -> Result<Option<T>, SearchError> {
    tokio::select! {
        biased;

        _ = cancel.cancelled() => Ok(None),
        result = call => result.map(Some),
    }
}

/// First `remaining` candidates in link order; the goal is kept even past the budget.
fn within_budget(mut fresh: Vec<Node>, goal: &str, remaining: usize) -> Vec<Node> {
    match fresh.iter().position(|n| n == goal) {
        Some(pos) if pos >= remaining => {
            let goal = fresh.swap_remove(pos);
            fresh.truncate(remaining.saturating_sub(1));
            fresh.push(goal);
            fresh
        }
        _ => {
            fresh.truncate(remaining);
            fresh
        }
    }
}
