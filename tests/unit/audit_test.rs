//! Tests for audit sink

use prometheus_topic_activation::core::{
    build_audit_event, AuditAction, AuditSink, InMemoryAuditSink, NoopAuditSink,
};
use prometheus_topic_activation::util::Weight;

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(7, 110, AuditAction::Activated, Some(Weight::new(2.0)), 100);
    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].topic_id, 7);
    assert_eq!(events[0].action, AuditAction::Activated);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event(1, 10, AuditAction::Activated, None, 0));
    sink.record(build_audit_event(2, 10, AuditAction::Activated, None, 0));
    sink.record(build_audit_event(3, 10, AuditAction::Evicted, None, 0));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].topic_id, 2); // First one popped
    assert_eq!(events[1].topic_id, 3);
}

#[test]
fn test_clones_share_buffer() {
    let sink = InMemoryAuditSink::new(4);
    let mut writer = sink.clone();
    writer.record(build_audit_event(5, 20, AuditAction::Inactivated, None, 15));
    assert_eq!(sink.events_for(5).len(), 1);
    assert!(sink.events_for(6).is_empty());
}

#[test]
fn test_build_audit_event() {
    let a = build_audit_event(9, 120, AuditAction::Rejected, Some(Weight::new(0.5)), 110);
    let b = build_audit_event(9, 120, AuditAction::Rejected, Some(Weight::new(0.5)), 110);

    assert_eq!(a.topic_id, 9);
    assert_eq!(a.block, 120);
    assert_eq!(a.action, AuditAction::Rejected);
    assert_eq!(a.weight, Some(Weight::new(0.5)));
    assert_eq!(a.recorded_at_block, 110);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_action_serializes_snake_case() {
    let json = serde_json::to_string(&AuditAction::Inactivated).unwrap();
    assert_eq!(json, "\"inactivated\"");
}

#[test]
fn test_noop_sink_accepts_events() {
    let mut sink = NoopAuditSink;
    sink.record(build_audit_event(1, 1, AuditAction::Relocated, None, 0));
}
