//! Infrastructure adapters: store backends and reference collaborators.

pub mod params;
pub mod store;
pub mod topics;
pub mod weights;

pub use params::SharedParams;
pub use store::{FileStore, InMemoryStore};
pub use topics::InMemoryTopics;
pub use weights::InMemoryWeights;
