

pub mod base;
pub mod cohere;
pub mod factory;
pub mod openai;

pub use base::{EmbeddingBackend, EmbeddingError};
pub use cohere::CohereEmbedder;
pub use factory::EmbeddingProviderFactory;
pub use openai::OpenAiEmbedder;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmbeddingProviderKind {
    Cohere,
    OpenAi,
}

impl EmbeddingProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Cohere => cohere::DEFAULT_COHERE_MODEL,
            Self::OpenAi => openai::DEFAULT_OPENAI_MODEL,
        }
    }
}
