use crate::domain::values::metadata_value::Metadata;
use serde::Serialize;

/// One ranked hit. Built per query and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub score: f64,
    pub metadata: Metadata,
}

/// Two stored records whose similarity met the duplicate threshold.
/// `first` was inserted before `second`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
