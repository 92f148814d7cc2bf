//! In-memory weight provider.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{ActivationError, WeightProvider};
use crate::util::serde::{TopicId, Weight};

#[derive(Default)]
struct WeightTable {
    weights: HashMap<TopicId, Weight>,
    unavailable: HashSet<TopicId>,
}

/// Host-updatable weight table. Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryWeights {
    inner: Arc<RwLock<WeightTable>>,
}

impl InMemoryWeights {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of `topic_id` and clear any unavailability mark.
    pub fn set(&self, topic_id: TopicId, weight: impl Into<Weight>) {
        let mut table = self.inner.write();
        table.weights.insert(topic_id, weight.into());
        table.unavailable.remove(&topic_id);
    }

    /// Make lookups for `topic_id` fail until the next `set`.
    pub fn mark_unavailable(&self, topic_id: TopicId) {
        self.inner.write().unavailable.insert(topic_id);
    }

    /// Forget `topic_id` entirely.
    pub fn remove(&self, topic_id: TopicId) {
        let mut table = self.inner.write();
        table.weights.remove(&topic_id);
        table.unavailable.remove(&topic_id);
    }
}

impl WeightProvider for InMemoryWeights {
    fn weight_of(&self, topic_id: TopicId) -> Result<Weight, ActivationError> {
        let table = self.inner.read();
        if table.unavailable.contains(&topic_id) {
            return Err(ActivationError::WeightUnavailable {
                topic_id,
                reason: "weight source unavailable".into(),
            });
        }
        table
            .weights
            .get(&topic_id)
            .copied()
            .ok_or_else(|| ActivationError::WeightUnavailable {
                topic_id,
                reason: "no weight recorded".into(),
            })
    }
}
