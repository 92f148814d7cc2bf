//! Builders to construct an activation scheduler from configuration.

use crate::config::{ActivationConfig, StoreBackendConfig};
use crate::core::{
    ActivationError, ActivationScheduler, ActivationStores, InMemoryAuditSink, StepProvider,
    TopicRegistry, WeightProvider,
};
use crate::infra::SharedParams;

/// Scheduler wired with the crate's shared parameter handle.
pub type ConfiguredScheduler<W, C, T> = ActivationScheduler<W, C, SharedParams, T>;

/// Handles the host keeps after building a scheduler.
pub struct BuiltScheduler<W, C, T> {
    /// The scheduler itself.
    pub scheduler: ConfiguredScheduler<W, C, T>,
    /// Parameter handle for governance updates.
    pub params: SharedParams,
    /// Audit buffer, when `audit_capacity` was configured.
    pub audit: Option<InMemoryAuditSink>,
}

/// Build a scheduler from configuration and host-provided collaborators.
pub fn build_scheduler<W, C, T>(
    cfg: &ActivationConfig,
    weights: W,
    clock: C,
    topics: T,
) -> Result<BuiltScheduler<W, C, T>, ActivationError>
where
    W: WeightProvider,
    C: StepProvider,
    T: TopicRegistry,
{
    cfg.validate()
        .map_err(|e| ActivationError::Config(format!("config invalid: {e}")))?;

    let stores = match &cfg.store {
        StoreBackendConfig::InMemory => ActivationStores::in_memory(),
        StoreBackendConfig::File { dir } => ActivationStores::open_file(dir)?,
    };
    let params = SharedParams::new(cfg.params.clone())?;

    let mut scheduler = ActivationScheduler::new(stores, weights, clock, params.clone(), topics)
        .with_consistency(cfg.consistency);
    let audit = cfg.audit_capacity.map(InMemoryAuditSink::new);
    if let Some(sink) = &audit {
        scheduler = scheduler.with_audit(Box::new(sink.clone()));
    }

    tracing::info!(
        "activation scheduler built: max_active_topics_per_block={}, consistency={:?}",
        cfg.params.max_active_topics_per_block,
        cfg.consistency
    );
    Ok(BuiltScheduler {
        scheduler,
        params,
        audit,
    })
}
