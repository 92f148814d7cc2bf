//! # Prometheus Topic Activation
//!
//! A weighted, capacity-bounded activation scheduler for block-driven hosts.
//!
//! Topics are units of recurring work, each with a weight (supplied by the
//! host) and an epoch length. An active topic is scheduled to churn at exactly
//! one future block. Every block admits at most `max_active_topics_per_block`
//! topics; when a block is full, a newcomer displaces the lowest-weight member
//! unless the newcomer is strictly lighter.
//!
//! ## Key Features
//!
//! - **Capacity-Bounded Admission**: per-block limit read fresh on every check
//! - **Lowest-Weight Eviction**: ties favor the newcomer
//! - **Cached Minimum**: per-block lowest-weight pair recomputed on admission
//! - **Pluggable Stores**: in-memory or JSON-lines files behind one keyed-store trait
//! - **Audit Trail**: every activation, rejection, eviction, and inactivation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prometheus_topic_activation::builders::build_scheduler;
//! use prometheus_topic_activation::config::ActivationConfig;
//! use prometheus_topic_activation::infra::{InMemoryTopics, InMemoryWeights};
//! use prometheus_topic_activation::util::clock::ManualBlockClock;
//!
//! let cfg = ActivationConfig::from_env()?;
//! let weights = InMemoryWeights::new();
//! let topics = InMemoryTopics::new();
//! let clock = ManualBlockClock::new(100);
//! topics.insert(7, 10);
//! weights.set(7, 3.5);
//!
//! let mut built = build_scheduler(&cfg, weights, clock, topics)?;
//! built.scheduler.activate(7)?;
//! assert!(built.scheduler.next_churn_block(7)?.pending);
//! ```
//!
//! Execution is serialized by the host: no operation runs concurrently with
//! another, so the scheduler takes `&mut self` and holds no locks of its own.
//!
//! For complete examples, see:
//! - `tests/activation_scheduler_test.rs` - Admission, eviction, and staleness scenarios

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core activation abstractions, stores, and the scheduler.
pub mod core;
/// Configuration models for parameters and store backends.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Infrastructure adapters for stores and host collaborators.
pub mod infra;
/// Shared value types, block clock, and telemetry.
pub mod util;
