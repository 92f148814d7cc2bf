//! Core activation abstractions, stores, and the capacity-bounded scheduler.

pub mod audit;
pub mod error;
pub mod providers;
pub mod scheduler;
pub mod store;

pub use audit::{
    build_audit_event, ActivationEvent, AuditAction, AuditSink, InMemoryAuditSink, NoopAuditSink,
};
pub use error::{ActivationError, AppResult};
pub use providers::{ParameterStore, StepProvider, TopicRegistry, WeightProvider};
pub use scheduler::{ActivationOutcome, ActivationScheduler, ChurnStatus, ConsistencyMode};
pub use store::{
    ActivationRegistry, ActivationStores, ChurnScheduleIndex, KeyedStore, StepActiveSetStore,
    StepLowestWeightCache,
};
