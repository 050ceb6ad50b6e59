

pub mod config;
pub mod error;
pub mod rate_limit;

pub use config::WikiseekConfig;
pub use error::{ConfigError, SearchError};
pub use rate_limit::RateGovernor;
