//! Store backends.

pub mod file;
pub mod memory;

use std::path::Path;

pub use file::FileStore;
pub use memory::InMemoryStore;

use crate::core::{ActivationError, ActivationStores};
use crate::util::serde::{BlockHeight, TopicId, TopicIdWeightPair, TopicIds};

impl ActivationStores {
    /// Four empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(InMemoryStore::<TopicId, ()>::new()),
            Box::new(InMemoryStore::<TopicId, BlockHeight>::new()),
            Box::new(InMemoryStore::<BlockHeight, TopicIds>::new()),
            Box::new(InMemoryStore::<BlockHeight, TopicIdWeightPair>::new()),
        )
    }

    /// Open the four file-backed stores under `dir`.
    pub fn open_file(dir: impl AsRef<Path>) -> Result<Self, ActivationError> {
        let dir = dir.as_ref();
        Ok(Self::new(
            Box::new(FileStore::<TopicId, ()>::open(dir, "active_topics")?),
            Box::new(FileStore::<TopicId, BlockHeight>::open(dir, "topic_next_churn_block")?),
            Box::new(FileStore::<BlockHeight, TopicIds>::open(dir, "block_active_topics")?),
            Box::new(FileStore::<BlockHeight, TopicIdWeightPair>::open(
                dir,
                "block_lowest_topic_weight",
            )?),
        ))
    }
}
