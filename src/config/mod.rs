//! Configuration models for activation parameters and store backends.

pub mod activation;

pub use activation::{ActivationConfig, ActivationParams, StoreBackendConfig};
