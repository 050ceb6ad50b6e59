

pub mod base;
pub mod wikipedia;

pub use base::{ContentBackend, ContentError};
pub use wikipedia::WikipediaClient;
