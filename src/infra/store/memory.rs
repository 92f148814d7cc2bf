//! In-memory keyed store backed by an ordered map.

use std::collections::BTreeMap;

use crate::core::{ActivationError, KeyedStore};

/// In-memory store for development, testing, and hosts that persist elsewhere.
#[derive(Debug, Clone)]
pub struct InMemoryStore<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> InMemoryStore<K, V> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for InMemoryStore<K, V>
where
    K: Ord,
    V: Clone,
{
    fn get(&self, key: &K) -> Result<Option<V>, ActivationError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: K, value: V) -> Result<(), ActivationError> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Result<(), ActivationError> {
        self.entries.remove(key);
        Ok(())
    }
}
