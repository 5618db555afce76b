//! Shared test helpers.
#![allow(dead_code)]

use vectordb::{InMemoryVectorStore, Metadata, MetadataValue, VectorStore};

pub const EPS: f64 = 1e-6;

pub fn meta(pairs: &[(&str, MetadataValue)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn category(name: &str) -> Metadata {
    meta(&[("category", MetadataValue::Text(name.to_string()))])
}

/// The five-document store used across the search tests.
pub fn docs_store() -> InMemoryVectorStore {
    let mut store = InMemoryVectorStore::with_dimension("test_search", 4).unwrap();
    let docs: [(&str, [f32; 4], &str); 5] = [
        ("doc1", [1.0, 0.0, 0.0, 0.0], "tech"),
        ("doc2", [0.9, 0.1, 0.0, 0.0], "tech"),
        ("doc3", [0.0, 1.0, 0.0, 0.0], "science"),
        ("doc4", [0.0, 0.0, 1.0, 0.0], "tech"),
        ("doc5", [0.8, 0.2, 0.0, 0.0], "tech"),
    ];
    for (id, v, cat) in docs {
        store.add_vector(id, v.to_vec(), category(cat)).unwrap();
    }
    store
}
