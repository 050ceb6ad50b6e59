

pub mod content;
pub mod core;
pub mod embeddings;
pub mod search;
pub mod utils;

pub use utils::{normalize_title, truncate_for_log};


pub use crate::core::config::WikiseekConfig;
pub use crate::core::error::{ConfigError, SearchError};
pub use crate::core::rate_limit::RateGovernor;
pub use content::{ContentBackend, ContentError, WikipediaClient};
pub use embeddings::{EmbeddingBackend, EmbeddingError, EmbeddingProviderFactory};
pub use search::{
    HeuristicEvaluator, LinkDiscovery, PathStep, SearchConfig, SearchEngine, SearchOutcome,
    SearchStrategy, TargetText,
};


pub const DEFAULT_WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";


pub const DEFAULT_RATE_LIMIT_CALLS: usize = 50;


pub const DEFAULT_RATE_LIMIT_PERIOD_SECS: u64 = 60;


pub const DEFAULT_MAX_BATCH_SIZE: usize = 96;
