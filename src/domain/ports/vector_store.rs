use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::VectorDbError;
use crate::domain::values::metadata_value::Metadata;
use chrono::{DateTime, Utc};

/// Predicate over a record's metadata.
pub type MetadataFilter<'a> = &'a dyn Fn(&Metadata) -> bool;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StoreStats {
    pub name: String,
    /// `None` until the first vector is stored or a dimension is declared.
    pub dimension: Option<usize>,
    pub total_vectors: usize,
    pub created_at: DateTime<Utc>,
    pub memory_estimate_mb: f64,
}

/// Outcome of a batch insert. Entries are reported in input order.
#[derive(Debug, Default)]
pub struct BatchInsert {
    pub added: Vec<String>,
    pub failed: Vec<(String, VectorDbError)>,
}

impl BatchInsert {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Keyed collection of vector records with a fixed dimension.
///
/// Mutating methods take `&mut self`; everything else is a shared read, so
/// a search borrowing the store cannot overlap with a write.
pub trait VectorStore {
    fn name(&self) -> &str;
    fn dimension(&self) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool;

    fn add_vector(&mut self, id: &str, vector: Vec<f32>, metadata: Metadata) -> Result<(), VectorDbError>;
    fn add_vectors(&mut self, entries: Vec<(String, Vec<f32>, Metadata)>) -> BatchInsert;
    fn get_vector(&self, id: &str) -> Result<VectorRecord, VectorDbError>;
    fn get_vector_data(&self, id: &str) -> Result<Vec<f32>, VectorDbError>;
    fn update_vector(
        &mut self,
        id: &str,
        vector: Option<Vec<f32>>,
        metadata: Option<Metadata>,
    ) -> Result<(), VectorDbError>;
    fn delete_vector(&mut self, id: &str) -> Result<(), VectorDbError>;

    /// Keys in insertion order.
    fn ids(&self) -> Vec<String>;
    /// Borrowed view of every record in insertion order.
    fn records(&self) -> Box<dyn Iterator<Item = (&str, &VectorRecord)> + '_>;
    fn filter_by_metadata(&self, predicate: MetadataFilter<'_>) -> Vec<(String, VectorRecord)>;
    fn get_stats(&self) -> StoreStats;
}
