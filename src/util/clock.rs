//! Block clock helpers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::StepProvider;
use crate::util::serde::BlockHeight;

/// Host-driven block counter. Clones share the same height.
#[derive(Debug, Clone, Default)]
pub struct ManualBlockClock {
    height: Arc<AtomicU64>,
}

impl ManualBlockClock {
    /// Create a clock positioned at `height`.
    #[must_use]
    pub fn new(height: BlockHeight) -> Self {
        Self {
            height: Arc::new(AtomicU64::new(height)),
        }
    }

    /// Move the clock to `height`. Heights never go backwards.
    pub fn set(&self, height: BlockHeight) {
        self.height.fetch_max(height, Ordering::AcqRel);
    }

    /// Advance by `blocks` and return the new height.
    pub fn advance(&self, blocks: BlockHeight) -> BlockHeight {
        self.height.fetch_add(blocks, Ordering::AcqRel) + blocks
    }
}

impl StepProvider for ManualBlockClock {
    fn current_block(&self) -> BlockHeight {
        self.height.load(Ordering::Acquire)
    }
}
