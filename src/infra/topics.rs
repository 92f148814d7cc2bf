//! In-memory topic registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{ActivationError, TopicRegistry};
use crate::util::serde::{BlockHeight, Topic, TopicId};

/// Host-managed topic metadata. Clones share the same registry.
#[derive(Clone, Default)]
pub struct InMemoryTopics {
    topics: Arc<RwLock<HashMap<TopicId, Topic>>>,
}

impl InMemoryTopics {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a topic.
    pub fn insert(&self, id: TopicId, epoch_length: BlockHeight) {
        self.topics.write().insert(id, Topic { id, epoch_length });
    }

    /// Unregister a topic.
    pub fn remove(&self, id: TopicId) {
        self.topics.write().remove(&id);
    }
}

impl TopicRegistry for InMemoryTopics {
    fn exists(&self, topic_id: TopicId) -> Result<bool, ActivationError> {
        Ok(self.topics.read().contains_key(&topic_id))
    }

    fn get(&self, topic_id: TopicId) -> Result<Option<Topic>, ActivationError> {
        Ok(self.topics.read().get(&topic_id).cloned())
    }
}
