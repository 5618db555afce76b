mod common;

use common::{category, meta};
use vectordb::{InMemoryVectorStore, Metadata, MetadataValue, VectorDbError, VectorStore};

#[test]
fn test_add_and_get() {
    let mut store = InMemoryVectorStore::with_dimension("t", 3).unwrap();
    store
        .add_vector("a", vec![1.0, 2.0, 3.0], category("tech"))
        .unwrap();

    let record = store.get_vector("a").unwrap();
    assert_eq!(record.vector, vec![1.0, 2.0, 3.0]);
    assert_eq!(record.metadata["category"], MetadataValue::Text("tech".into()));
    assert_eq!(store.len(), 1);
    assert!(store.contains("a"));
}

#[test]
fn test_get_returns_a_copy() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("a", vec![1.0, 0.0], Metadata::new()).unwrap();

    let mut copy = store.get_vector("a").unwrap();
    copy.vector[0] = 99.0;
    copy.metadata.insert("x".into(), MetadataValue::Bool(true));

    let fresh = store.get_vector("a").unwrap();
    assert_eq!(fresh.vector, vec![1.0, 0.0]);
    assert!(fresh.metadata.is_empty());
}

#[test]
fn test_get_missing() {
    let store = InMemoryVectorStore::new("t");
    assert!(matches!(store.get_vector("nope"), Err(VectorDbError::NotFound(_))));
    assert!(matches!(store.get_vector_data("nope"), Err(VectorDbError::NotFound(_))));
}

#[test]
fn test_wrong_dimension_rejected() {
    let mut store = InMemoryVectorStore::with_dimension("t", 3).unwrap();
    let err = store.add_vector("a", vec![1.0, 2.0], Metadata::new()).unwrap_err();
    assert!(matches!(err, VectorDbError::DimensionMismatch { expected: 3, actual: 2 }));
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_key() {
    let mut store = InMemoryVectorStore::new("t");
    store.add_vector("a", vec![1.0, 0.0], category("first")).unwrap();
    let err = store
        .add_vector("a", vec![0.0, 1.0], category("second"))
        .unwrap_err();
    assert!(matches!(err, VectorDbError::DuplicateKey(_)));

    let record = store.get_vector("a").unwrap();
    assert_eq!(record.vector, vec![1.0, 0.0]);
    assert_eq!(record.metadata, category("first"));
}

#[test]
fn test_batch_insert_is_partial() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("existing", vec![1.0, 1.0], Metadata::new()).unwrap();

    let report = store.add_vectors(vec![
        ("ok1".into(), vec![1.0, 0.0], Metadata::new()),
        ("short".into(), vec![1.0], Metadata::new()),
        ("existing".into(), vec![0.0, 1.0], Metadata::new()),
        ("ok2".into(), vec![0.0, 1.0], category("x")),
    ]);

    assert_eq!(report.added, vec!["ok1".to_string(), "ok2".to_string()]);
    assert_eq!(report.added_count(), 2);
    assert!(!report.is_complete());
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, "short");
    assert!(matches!(report.failed[0].1, VectorDbError::DimensionMismatch { .. }));
    assert_eq!(report.failed[1].0, "existing");
    assert!(matches!(report.failed[1].1, VectorDbError::DuplicateKey(_)));

    assert_eq!(store.len(), 3);
    assert_eq!(store.get_vector("existing").unwrap().vector, vec![1.0, 1.0]);
}

#[test]
fn test_batch_insert_seeds_dimension() {
    let mut store = InMemoryVectorStore::new("t");
    let report = store.add_vectors(vec![
        ("a".into(), vec![1.0, 0.0, 0.0], Metadata::new()),
        ("b".into(), vec![1.0, 0.0], Metadata::new()),
    ]);
    assert_eq!(store.dimension(), Some(3));
    assert_eq!(report.added, vec!["a".to_string()]);
    assert_eq!(report.failed[0].0, "b");
}

#[test]
fn test_update_metadata_only() {
    let mut store = InMemoryVectorStore::with_dimension("t", 3).unwrap();
    store.add_vector("a", vec![1.0, 0.0, 0.0], Metadata::new()).unwrap();
    let before = store.get_vector("a").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));

    store
        .update_vector("a", None, Some(meta(&[("x", MetadataValue::Integer(1))])))
        .unwrap();

    let after = store.get_vector("a").unwrap();
    assert_eq!(after.vector, before.vector);
    assert_eq!(after.metadata["x"], MetadataValue::Integer(1));
    assert!(after.timestamp > before.timestamp);
}

#[test]
fn test_update_vector_only() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("a", vec![1.0, 0.0], category("keep")).unwrap();
    store.update_vector("a", Some(vec![0.0, 1.0]), None).unwrap();

    let record = store.get_vector("a").unwrap();
    assert_eq!(record.vector, vec![0.0, 1.0]);
    assert_eq!(record.metadata, category("keep"));
}

#[test]
fn test_update_rejects_bad_input() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("a", vec![1.0, 0.0], category("keep")).unwrap();
    let before = store.get_vector("a").unwrap();

    let err = store
        .update_vector("a", Some(vec![1.0, 2.0, 3.0]), Some(category("lost")))
        .unwrap_err();
    assert!(matches!(err, VectorDbError::DimensionMismatch { .. }));
    assert_eq!(store.get_vector("a").unwrap(), before);

    let err = store.update_vector("missing", None, None).unwrap_err();
    assert!(matches!(err, VectorDbError::NotFound(_)));
}

#[test]
fn test_non_finite_vector_rejected() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("good", vec![1.0, 0.0], Metadata::new()).unwrap();

    let err = store.add_vector("nan", vec![f32::NAN, 0.0], Metadata::new()).unwrap_err();
    assert!(matches!(err, VectorDbError::Validation(_)));
    assert!(!store.contains("nan"));

    let before = store.get_vector("good").unwrap();
    let err = store
        .update_vector("good", Some(vec![f32::INFINITY, 0.0]), None)
        .unwrap_err();
    assert!(matches!(err, VectorDbError::Validation(_)));
    assert_eq!(store.get_vector("good").unwrap(), before);

    let engine = vectordb::SearchEngine::new(&store);
    let results = engine.search(&[1.0, 0.0], 1, None).unwrap();
    assert_eq!(results[0].id, "good");
}

#[test]
fn test_non_finite_metadata_rejected() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    let bad = meta(&[("score", MetadataValue::Float(f64::NAN))]);
    let err = store.add_vector("a", vec![1.0, 0.0], bad.clone()).unwrap_err();
    assert!(matches!(err, VectorDbError::Validation(_)));
    assert!(store.is_empty());

    store.add_vector("a", vec![1.0, 0.0], category("keep")).unwrap();
    let err = store.update_vector("a", None, Some(bad)).unwrap_err();
    assert!(matches!(err, VectorDbError::Validation(_)));
    assert_eq!(store.get_vector("a").unwrap().metadata, category("keep"));
}

#[test]
fn test_delete() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("a", vec![1.0, 0.0], Metadata::new()).unwrap();
    store.delete_vector("a").unwrap();
    assert!(!store.contains("a"));
    assert!(matches!(store.get_vector("a"), Err(VectorDbError::NotFound(_))));
}

#[test]
fn test_delete_missing_keeps_count() {
    let mut store = InMemoryVectorStore::with_dimension("t", 2).unwrap();
    store.add_vector("a", vec![1.0, 0.0], Metadata::new()).unwrap();
    let err = store.delete_vector("missing").unwrap_err();
    assert!(matches!(err, VectorDbError::NotFound(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_filter_by_metadata() {
    let store = common::docs_store();
    let tech = store.filter_by_metadata(&|m: &Metadata| {
        m.get("category").and_then(|v| v.as_str()) == Some("tech")
    });
    let ids: Vec<_> = tech.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["doc1", "doc2", "doc4", "doc5"]);

    let none = store.filter_by_metadata(&|m: &Metadata| m.contains_key("missing"));
    assert!(none.is_empty());
    assert_eq!(store.len(), 5);
}

#[test]
fn test_stats() {
    let store = InMemoryVectorStore::new("fresh");
    let stats = store.get_stats();
    assert_eq!(stats.name, "fresh");
    assert_eq!(stats.dimension, None);
    assert_eq!(stats.total_vectors, 0);

    let store = common::docs_store();
    let stats = store.get_stats();
    assert_eq!(stats.name, "test_search");
    assert_eq!(stats.dimension, Some(4));
    assert_eq!(stats.total_vectors, 5);
    assert_eq!(stats.created_at, store.created_at());
}

#[test]
fn test_ids_in_insertion_order() {
    let store = common::docs_store();
    assert_eq!(store.ids(), vec!["doc1", "doc2", "doc3", "doc4", "doc5"]);
}
