//! Tests for configuration validation

use std::collections::HashMap;

use prometheus_topic_activation::config::{ActivationConfig, ActivationParams, StoreBackendConfig};
use prometheus_topic_activation::core::ConsistencyMode;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_params_validation() {
    assert!(ActivationParams::default().validate().is_ok());
    let invalid = ActivationParams {
        max_active_topics_per_block: 0,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_default_config_is_valid() {
    let config = ActivationConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.store, StoreBackendConfig::InMemory);
    assert_eq!(config.consistency, ConsistencyMode::Compatible);
    assert_eq!(config.params.max_active_topics_per_block, 1);
}

#[test]
fn test_config_invalid_audit_capacity() {
    let config = ActivationConfig {
        audit_capacity: Some(0),
        ..ActivationConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_invalid_store_dir() {
    let config = ActivationConfig {
        store: StoreBackendConfig::File { dir: "".into() },
        ..ActivationConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "params": { "max_active_topics_per_block": 8 },
        "store": { "kind": "file", "dir": "/var/lib/activation" },
        "consistency": "strict",
        "audit_capacity": 256
    }"#;

    let config = ActivationConfig::from_json_str(json).unwrap();
    assert_eq!(config.params.max_active_topics_per_block, 8);
    assert_eq!(
        config.store,
        StoreBackendConfig::File {
            dir: "/var/lib/activation".into()
        }
    );
    assert_eq!(config.consistency, ConsistencyMode::Strict);
    assert_eq!(config.audit_capacity, Some(256));
}

#[test]
fn test_config_from_json_defaults_missing_sections() {
    let config = ActivationConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ActivationConfig::default());
}

#[test]
fn test_config_from_json_rejects_zero_capacity() {
    let json = r#"{ "params": { "max_active_topics_per_block": 0 } }"#;
    assert!(ActivationConfig::from_json_str(json).is_err());
}

#[test]
fn test_config_from_lookup() {
    let config = ActivationConfig::from_lookup(lookup(&[
        ("TOPIC_ACTIVATION_MAX_ACTIVE_TOPICS_PER_BLOCK", "5"),
        ("TOPIC_ACTIVATION_STORE_DIR", "/tmp/activation"),
        ("TOPIC_ACTIVATION_CONSISTENCY", "Strict"),
        ("TOPIC_ACTIVATION_AUDIT_CAPACITY", "32"),
    ]))
    .unwrap();

    assert_eq!(config.params.max_active_topics_per_block, 5);
    assert_eq!(
        config.store,
        StoreBackendConfig::File {
            dir: "/tmp/activation".into()
        }
    );
    assert_eq!(config.consistency, ConsistencyMode::Strict);
    assert_eq!(config.audit_capacity, Some(32));
}

#[test]
fn test_config_from_lookup_rejects_bad_values() {
    assert!(ActivationConfig::from_lookup(lookup(&[(
        "TOPIC_ACTIVATION_MAX_ACTIVE_TOPICS_PER_BLOCK",
        "many"
    )]))
    .is_err());
    assert!(ActivationConfig::from_lookup(lookup(&[(
        "TOPIC_ACTIVATION_MAX_ACTIVE_TOPICS_PER_BLOCK",
        "0"
    )]))
    .is_err());
    assert!(
        ActivationConfig::from_lookup(lookup(&[("TOPIC_ACTIVATION_CONSISTENCY", "loose")]))
            .is_err()
    );
}
