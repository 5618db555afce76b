use crate::domain::values::metadata_value::Metadata;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RecordInput {
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInput {
    pub vector: Option<Vec<f32>>,
    pub metadata: Option<Metadata>,
}

pub fn parse_vector(s: &str) -> Result<Vec<f32>, String> {
    serde_json::from_str(s).map_err(|e| format!("Invalid vector '{s}': {e}"))
}

/// Batch input, keeping the caller's key order.
pub fn parse_import(s: &str) -> Result<Vec<(String, Vec<f32>, Metadata)>, String> {
    let entries: IndexMap<String, RecordInput> =
        serde_json::from_str(s).map_err(|e| format!("Invalid import JSON: {e}"))?;
    Ok(entries
        .into_iter()
        .map(|(id, r)| (id, r.vector, r.metadata))
        .collect())
}

/// A `key=value` metadata condition. Values compare by their display form,
/// so `count=3` matches an integer 3 and `ok=true` a boolean.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub key: String,
    pub value: String,
}

impl FieldFilter {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.split_once('=') {
            Some((k, v)) if !k.is_empty() => Ok(Self {
                key: k.to_string(),
                value: v.to_string(),
            }),
            _ => Err(format!("Invalid filter '{s}'. Use key=value")),
        }
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        metadata
            .get(&self.key)
            .is_some_and(|v| v.to_string() == self.value)
    }
}

pub fn parse_filters(raw: &[String]) -> Result<Vec<FieldFilter>, String> {
    raw.iter().map(|s| FieldFilter::parse(s)).collect()
}

pub fn matches_all(filters: &[FieldFilter], metadata: &Metadata) -> bool {
    filters.iter().all(|f| f.matches(metadata))
}
