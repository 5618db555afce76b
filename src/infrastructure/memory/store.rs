use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::VectorDbError;
use crate::domain::ports::vector_store::{BatchInsert, MetadataFilter, StoreStats, VectorStore};
use crate::domain::values::cosine::ensure_finite;
use crate::domain::values::metadata_value::{ensure_finite_metadata, Metadata};
use crate::infrastructure::json::snapshot::{self, SnapshotRef};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Owned, insertion-ordered vector store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct InMemoryVectorStore {
    name: String,
    dimension: Option<usize>,
    created_at: DateTime<Utc>,
    records: IndexMap<String, VectorRecord>,
}

impl InMemoryVectorStore {
    /// Empty store; the dimension is taken from the first vector added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: None,
            created_at: Utc::now(),
            records: IndexMap::new(),
        }
    }

    pub fn with_dimension(name: impl Into<String>, dimension: usize) -> Result<Self, VectorDbError> {
        if dimension == 0 {
            return Err(VectorDbError::Validation("dimension must be positive".into()));
        }
        let mut store = Self::new(name);
        store.dimension = Some(dimension);
        Ok(store)
    }

    /// Reads a store from `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VectorDbError> {
        let mut store = Self::new(String::new());
        store.load(path)?;
        Ok(store)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn check_vector(&self, vector: &[f32]) -> Result<(), VectorDbError> {
        match self.dimension {
            Some(dim) if vector.len() != dim => {
                return Err(VectorDbError::dimension(dim, vector.len()))
            }
            None if vector.is_empty() => {
                return Err(VectorDbError::Validation("vector must not be empty".into()))
            }
            _ => {}
        }
        ensure_finite(vector)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), VectorDbError> {
        let path = path.as_ref();
        snapshot::write(
            path,
            &SnapshotRef {
                name: &self.name,
                dimension: self.dimension,
                created_at: self.created_at,
                vectors: &self.records,
            },
        )?;
        info!(path = %path.display(), count = self.records.len(), "Saved vector store");
        Ok(())
    }

    /// Replaces the whole store from `path`. On any error the current
    /// contents are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), VectorDbError> {
        let path = path.as_ref();
        let snap = snapshot::read(path)?;
        self.name = snap.name;
        self.dimension = snap.dimension;
        self.created_at = snap.created_at.unwrap_or_else(Utc::now);
        self.records = snap.vectors;
        info!(path = %path.display(), count = self.records.len(), "Loaded vector store");
        Ok(())
    }
}

impl VectorStore for InMemoryVectorStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    fn add_vector(&mut self, id: &str, vector: Vec<f32>, metadata: Metadata) -> Result<(), VectorDbError> {
        if self.records.contains_key(id) {
            return Err(VectorDbError::DuplicateKey(id.to_string()));
        }
        self.check_vector(&vector)?;
        ensure_finite_metadata(&metadata)?;
        if self.dimension.is_none() {
            debug!(dimension = vector.len(), "Dimension established by first vector");
            self.dimension = Some(vector.len());
        }
        self.records.insert(id.to_string(), VectorRecord::new(vector, metadata));
        debug!(id, "Added vector");
        Ok(())
    }

    fn add_vectors(&mut self, entries: Vec<(String, Vec<f32>, Metadata)>) -> BatchInsert {
        let mut report = BatchInsert::default();
        for (id, vector, metadata) in entries {
            match self.add_vector(&id, vector, metadata) {
                Ok(()) => report.added.push(id),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping vector in batch insert");
                    report.failed.push((id, e));
                }
            }
        }
        report
    }

    fn get_vector(&self, id: &str) -> Result<VectorRecord, VectorDbError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| VectorDbError::NotFound(id.to_string()))
    }

    fn get_vector_data(&self, id: &str) -> Result<Vec<f32>, VectorDbError> {
        self.records
            .get(id)
            .map(|r| r.vector.clone())
            .ok_or_else(|| VectorDbError::NotFound(id.to_string()))
    }

    fn update_vector(
        &mut self,
        id: &str,
        vector: Option<Vec<f32>>,
        metadata: Option<Metadata>,
    ) -> Result<(), VectorDbError> {
        if !self.records.contains_key(id) {
            return Err(VectorDbError::NotFound(id.to_string()));
        }
        if let Some(v) = &vector {
            self.check_vector(v)?;
        }
        if let Some(m) = &metadata {
            ensure_finite_metadata(m)?;
        }
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| VectorDbError::NotFound(id.to_string()))?;
        if let Some(v) = vector {
            record.vector = v;
        }
        if let Some(m) = metadata {
            record.metadata = m;
        }
        record.touch();
        debug!(id, "Updated vector");
        Ok(())
    }

    fn delete_vector(&mut self, id: &str) -> Result<(), VectorDbError> {
        // shift_remove keeps the remaining records in insertion order
        if self.records.shift_remove(id).is_none() {
            return Err(VectorDbError::NotFound(id.to_string()));
        }
        debug!(id, "Deleted vector");
        Ok(())
    }

    fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    fn records(&self) -> Box<dyn Iterator<Item = (&str, &VectorRecord)> + '_> {
        Box::new(self.records.iter().map(|(id, r)| (id.as_str(), r)))
    }

    fn filter_by_metadata(&self, predicate: MetadataFilter<'_>) -> Vec<(String, VectorRecord)> {
        self.records
            .iter()
            .filter(|(_, r)| predicate(&r.metadata))
            .map(|(id, r)| (id.clone(), r.clone()))
            .collect()
    }

    fn get_stats(&self) -> StoreStats {
        let total = self.records.len();
        let bytes = total * self.dimension.unwrap_or(0) * std::mem::size_of::<f32>();
        let mb = bytes as f64 / (1024.0 * 1024.0);
        StoreStats {
            name: self.name.clone(),
            dimension: self.dimension,
            total_vectors: total,
            created_at: self.created_at,
            memory_estimate_mb: (mb * 100.0).round() / 100.0,
        }
    }
}
