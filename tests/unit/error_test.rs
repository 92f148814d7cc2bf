//! Tests for error types

use prometheus_topic_activation::core::ActivationError;

#[test]
fn test_store_error() {
    let err = ActivationError::Store("connection failed".to_string());
    assert_eq!(format!("{}", err), "store error: connection failed");
}

#[test]
fn test_store_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let err = ActivationError::store(io);
    assert_eq!(format!("{}", err), "store error: read-only");
}

#[test]
fn test_weight_unavailable_error() {
    let err = ActivationError::WeightUnavailable {
        topic_id: 7,
        reason: "oracle offline".to_string(),
    };
    assert_eq!(format!("{}", err), "weight unavailable for topic 7: oracle offline");
}

#[test]
fn test_config_error() {
    let err = ActivationError::Config("bad capacity".to_string());
    assert_eq!(format!("{}", err), "config error: bad capacity");
}
