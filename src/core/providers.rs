//! Interfaces to the host-owned collaborators the scheduler consults.

use crate::core::ActivationError;
use crate::util::serde::{BlockHeight, Topic, TopicId, Weight};

/// Source of topic weights. Weights are computed outside this crate.
pub trait WeightProvider {
    /// Current weight of `topic_id`.
    fn weight_of(&self, topic_id: TopicId) -> Result<Weight, ActivationError>;
}

/// Source of the current block height. Must be monotonically non-decreasing.
pub trait StepProvider {
    /// Height of the block being processed.
    fn current_block(&self) -> BlockHeight;
}

/// Governance-owned parameters, read fresh on every capacity check.
pub trait ParameterStore {
    /// Maximum number of topics allowed to churn at a single block.
    fn max_active_topics_per_block(&self) -> Result<u64, ActivationError>;
}

/// Topic metadata registry.
pub trait TopicRegistry {
    /// Whether `topic_id` is registered.
    fn exists(&self, topic_id: TopicId) -> Result<bool, ActivationError>;
    /// Metadata for `topic_id`, or `None` when unregistered.
    fn get(&self, topic_id: TopicId) -> Result<Option<Topic>, ActivationError>;
}
