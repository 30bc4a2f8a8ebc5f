//! Error types for the starfield core

use thiserror::Error;

/// Failures the engine recovers from locally. None of these reach the host page.
#[derive(Debug, Error)]
pub enum StarfieldError {
    #[error("persisted state is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("persisted particle array is empty")]
    EmptyPopulation,

    #[error("persisted metadata is not an object")]
    MalformedMeta,

    #[error("persisted particle {index} has a non-finite field")]
    NonFiniteParticle { index: usize },

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("storage write failed for {key}: {reason}")]
    StorageWrite { key: &'static str, reason: String },
}

/// Result type alias for starfield operations
pub type Result<T> = std::result::Result<T, StarfieldError>;
