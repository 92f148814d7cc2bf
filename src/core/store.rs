//! Keyed store contract and the four activation stores.
//!
//! Stores hold no business logic. `get` separates "not found" (`Ok(None)`)
//! from backend failure (`Err`), `set` overwrites, and `remove` on an absent
//! key is a no-op.

use crate::core::ActivationError;
use crate::util::serde::{BlockHeight, TopicId, TopicIdWeightPair, TopicIds};

/// Abstraction for keyed persistence backends.
pub trait KeyedStore<K, V> {
    /// Fetch the value under `key`, or `None` when absent.
    fn get(&self, key: &K) -> Result<Option<V>, ActivationError>;
    /// Overwrite the value under `key`.
    fn set(&mut self, key: K, value: V) -> Result<(), ActivationError>;
    /// Delete `key` if present.
    fn remove(&mut self, key: &K) -> Result<(), ActivationError>;
    /// Whether `key` is present.
    fn has(&self, key: &K) -> Result<bool, ActivationError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Set of topic ids currently flagged active.
pub type ActivationRegistry = Box<dyn KeyedStore<TopicId, ()> + Send>;
/// Topic id to the block of its next scheduled churn.
pub type ChurnScheduleIndex = Box<dyn KeyedStore<TopicId, BlockHeight> + Send>;
/// Block to the bounded, insertion-ordered topics churning there.
pub type StepActiveSetStore = Box<dyn KeyedStore<BlockHeight, TopicIds> + Send>;
/// Block to the cached lowest-weight member of its active set.
pub type StepLowestWeightCache = Box<dyn KeyedStore<BlockHeight, TopicIdWeightPair> + Send>;

/// Handles to every store the scheduler reads and writes.
pub struct ActivationStores {
    /// Membership registry.
    pub registry: ActivationRegistry,
    /// Next-churn index.
    pub churn_schedule: ChurnScheduleIndex,
    /// Per-block active sets.
    pub active_sets: StepActiveSetStore,
    /// Per-block lowest-weight cache.
    pub lowest_weights: StepLowestWeightCache,
}

impl ActivationStores {
    /// Bundle four store handles.
    pub fn new(
        registry: ActivationRegistry,
        churn_schedule: ChurnScheduleIndex,
        active_sets: StepActiveSetStore,
        lowest_weights: StepLowestWeightCache,
    ) -> Self {
        Self {
            registry,
            churn_schedule,
            active_sets,
            lowest_weights,
        }
    }
}
