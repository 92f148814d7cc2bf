//! Error types for activation operations.

use thiserror::Error;

use crate::util::serde::TopicId;

/// Errors produced by the activation scheduler and its collaborators.
///
/// Not-found conditions and admission rejections are not errors; they surface
/// as `Option`s and outcomes instead.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// Persistent store failure; aborts the in-progress operation.
    #[error("store error: {0}")]
    Store(String),
    /// The weight provider could not produce a weight for a topic.
    #[error("weight unavailable for topic {topic_id}: {reason}")]
    WeightUnavailable {
        /// Topic whose weight lookup failed.
        topic_id: TopicId,
        /// Provider-supplied reason.
        reason: String,
    },
    /// Invalid parameters or configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl ActivationError {
    /// Build a store error from any displayable cause.
    pub fn store(cause: impl std::fmt::Display) -> Self {
        Self::Store(cause.to_string())
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
