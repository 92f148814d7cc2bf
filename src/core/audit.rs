//! Audit sink implementations.
//!
//! Records activation decisions so hosts can reconstruct why a topic entered
//! or left a block's active set.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::util::serde::{BlockHeight, TopicId, Weight};

/// Decision recorded by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Topic admitted to a block's active set.
    Activated,
    /// Topic refused because the block was full of heavier topics.
    Rejected,
    /// Topic displaced by a heavier newcomer.
    Evicted,
    /// Topic removed by an explicit inactivation.
    Inactivated,
    /// Topic moved to a new block by an update.
    Relocated,
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationEvent {
    /// Event identifier.
    pub event_id: String,
    /// Topic the decision applies to.
    pub topic_id: TopicId,
    /// Block whose active set was affected.
    pub block: BlockHeight,
    /// Decision taken.
    pub action: AuditAction,
    /// Weight consulted for the decision, when one was looked up.
    pub weight: Option<Weight>,
    /// Host block at which the decision was made.
    pub recorded_at_block: BlockHeight,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: ActivationEvent);
}

/// In-memory audit sink for testing and dev. Clones share one bounded buffer.
#[derive(Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<ActivationEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<ActivationEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Events recorded for `topic_id`, oldest first.
    #[must_use]
    pub fn events_for(&self, topic_id: TopicId) -> Vec<ActivationEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.topic_id == topic_id)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: ActivationEvent) {
        let mut events = self.events.lock();
        if self.max_events == 0 {
            return;
        }
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that drops every event.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&mut self, _event: ActivationEvent) {}
}

/// Helper to build an audit event with a fresh identifier.
#[must_use]
pub fn build_audit_event(
    topic_id: TopicId,
    block: BlockHeight,
    action: AuditAction,
    weight: Option<Weight>,
    recorded_at_block: BlockHeight,
) -> ActivationEvent {
    ActivationEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        topic_id,
        block,
        action,
        weight,
        recorded_at_block,
    }
}
