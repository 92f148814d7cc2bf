//! Tests for store backends

use std::path::PathBuf;

use prometheus_topic_activation::core::{ActivationError, ActivationStores, KeyedStore};
use prometheus_topic_activation::infra::FileStore;
use prometheus_topic_activation::util::{TopicIdWeightPair, TopicIds, Weight};

fn temp_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("activation-{label}-{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_file_store_persists_across_reopen() {
    let dir = temp_dir("reopen");
    {
        let mut store = FileStore::<u64, TopicIds>::open(&dir, "sets").unwrap();
        store.set(100, TopicIds::new(vec![1, 2])).unwrap();
        store.set(110, TopicIds::new(vec![3])).unwrap();
        store.remove(&110).unwrap();
    }

    let store = FileStore::<u64, TopicIds>::open(&dir, "sets").unwrap();
    assert_eq!(store.get(&100).unwrap(), Some(TopicIds::new(vec![1, 2])));
    assert_eq!(store.get(&110).unwrap(), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_file_store_remove_missing_is_noop() {
    let dir = temp_dir("remove");
    let mut store = FileStore::<u64, ()>::open(&dir, "registry").unwrap();
    store.remove(&1).unwrap();
    assert!(!store.file_path().exists());
    store.set(1, ()).unwrap();
    assert!(store.has(&1).unwrap());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_file_store_failed_set_keeps_previous_value() {
    let dir = temp_dir("failed-set");
    let mut store = FileStore::<u64, u64>::open(&dir, "sets").unwrap();
    store.set(1, 10).unwrap();

    // A directory in place of the temp file makes the next rewrite fail.
    std::fs::create_dir_all(dir.join("sets.jsonl.tmp")).unwrap();

    assert!(matches!(store.set(1, 20), Err(ActivationError::Store(_))));
    assert_eq!(store.get(&1).unwrap(), Some(10));
    assert!(matches!(store.set(2, 30), Err(ActivationError::Store(_))));
    assert_eq!(store.get(&2).unwrap(), None);
    assert!(matches!(store.remove(&1), Err(ActivationError::Store(_))));
    assert_eq!(store.get(&1).unwrap(), Some(10));

    let reopened = FileStore::<u64, u64>::open(&dir, "sets").unwrap();
    assert_eq!(reopened.get(&1).unwrap(), Some(10));
    assert_eq!(reopened.get(&2).unwrap(), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_file_store_reports_corrupt_file() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("weights.jsonl"), "not json\n").unwrap();

    let result = FileStore::<u64, TopicIdWeightPair>::open(&dir, "weights");
    assert!(matches!(result, Err(ActivationError::Store(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_activation_stores_file_round_trip() {
    let dir = temp_dir("stores");
    {
        let mut stores = ActivationStores::open_file(&dir).unwrap();
        stores.registry.set(7, ()).unwrap();
        stores.churn_schedule.set(7, 120).unwrap();
        stores.active_sets.set(120, TopicIds::new(vec![7])).unwrap();
        stores
            .lowest_weights
            .set(
                120,
                TopicIdWeightPair {
                    topic_id: 7,
                    weight: Weight::new(1.25),
                },
            )
            .unwrap();
    }

    let stores = ActivationStores::open_file(&dir).unwrap();
    assert!(stores.registry.has(&7).unwrap());
    assert_eq!(stores.churn_schedule.get(&7).unwrap(), Some(120));
    assert_eq!(stores.active_sets.get(&120).unwrap(), Some(TopicIds::new(vec![7])));
    assert_eq!(
        stores.lowest_weights.get(&120).unwrap().map(|p| p.weight),
        Some(Weight::new(1.25))
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_in_memory_stores_start_empty() {
    let stores = ActivationStores::in_memory();
    assert!(!stores.registry.has(&1).unwrap());
    assert_eq!(stores.churn_schedule.get(&1).unwrap(), None);
}
