//! Shared, host-mutable activation parameters.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ActivationParams;
use crate::core::{ActivationError, ParameterStore};

/// Parameter handle read fresh on every capacity check. Clones share state.
#[derive(Clone)]
pub struct SharedParams {
    inner: Arc<RwLock<ActivationParams>>,
}

impl SharedParams {
    /// Wrap validated parameters.
    pub fn new(params: ActivationParams) -> Result<Self, ActivationError> {
        params.validate().map_err(ActivationError::Config)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(params)),
        })
    }

    /// Replace the parameters after validating them.
    pub fn update(&self, params: ActivationParams) -> Result<(), ActivationError> {
        params.validate().map_err(ActivationError::Config)?;
        *self.inner.write() = params;
        Ok(())
    }

    /// Snapshot of the current parameters.
    #[must_use]
    pub fn get(&self) -> ActivationParams {
        self.inner.read().clone()
    }
}

impl ParameterStore for SharedParams {
    fn max_active_topics_per_block(&self) -> Result<u64, ActivationError> {
        Ok(self.inner.read().max_active_topics_per_block)
    }
}
