//! Serializable value types shared across stores, providers, and the scheduler.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic identifier.
pub type TopicId = u64;

/// Discrete step of the host timeline.
pub type BlockHeight = u64;

/// Sentinel block returned for topics without a scheduled churn.
pub const RESERVED_BLOCK: BlockHeight = 0;

/// Decimal topic weight supplied by the host's weight provider.
///
/// Ordering is total (`f64::total_cmp`) so weights can be compared and sorted
/// without special-casing NaN. Comparisons with `<` are strict.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// The zero weight, used to seed minimum computations.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a raw decimal value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw decimal value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cached minimum for a block: the topic holding it and its weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicIdWeightPair {
    /// Topic holding the lowest weight.
    pub topic_id: TopicId,
    /// Weight observed at the last recompute.
    pub weight: Weight,
}

/// Insertion-ordered set of topics scheduled to churn at one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicIds {
    /// Member topic ids, oldest admission first.
    pub topic_ids: Vec<TopicId>,
}

impl TopicIds {
    /// Wrap a list of ids.
    #[must_use]
    pub const fn new(topic_ids: Vec<TopicId>) -> Self {
        Self { topic_ids }
    }

    /// Whether `topic_id` is a member.
    #[must_use]
    pub fn contains(&self, topic_id: TopicId) -> bool {
        self.topic_ids.contains(&topic_id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topic_ids.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topic_ids.is_empty()
    }

    /// Remove the first occurrence of `topic_id`, preserving the order of the rest.
    /// Returns whether anything was removed.
    pub fn remove_first(&mut self, topic_id: TopicId) -> bool {
        match self.topic_ids.iter().position(|id| *id == topic_id) {
            Some(idx) => {
                self.topic_ids.remove(idx);
                true
            }
            None => false,
        }
    }
}

/// Registry-owned view of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier.
    pub id: TopicId,
    /// Blocks between two churns of this topic.
    pub epoch_length: BlockHeight,
}
