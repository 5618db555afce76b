//! Minimal vector database: fixed-dimension vectors with scalar metadata,
//! exact cosine-similarity search, and single-file JSON persistence.
//!
//! ```no_run
//! use vectordb::{InMemoryVectorStore, Metadata, SearchEngine, VectorStore};
//!
//! let mut store = InMemoryVectorStore::new("receipts");
//! store.add_vector("r1", vec![0.1, 0.9, 0.0], Metadata::new())?;
//! store.save("receipts.json")?;
//!
//! let engine = SearchEngine::new(&store);
//! let _hits = engine.search(&[0.1, 0.8, 0.1], 5, None)?;
//! # Ok::<(), vectordb::VectorDbError>(())
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

pub use crate::application::search::SearchEngine;
pub use crate::domain::entities::search_result::{DuplicatePair, SearchResult, SimilarityStats};
pub use crate::domain::entities::vector_record::VectorRecord;
pub use crate::domain::error::VectorDbError;
pub use crate::domain::ports::vector_store::{BatchInsert, MetadataFilter, StoreStats, VectorStore};
pub use crate::domain::values::cosine::{
    batch_cosine_similarity, cosine_distance, cosine_similarity, dot_product, magnitude,
};
pub use crate::domain::values::metadata_value::{Metadata, MetadataValue};
pub use crate::infrastructure::memory::store::InMemoryVectorStore;
