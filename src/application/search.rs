use crate::domain::entities::search_result::SearchResult;
use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::VectorDbError;
use crate::domain::ports::vector_store::{MetadataFilter, VectorStore};
use crate::domain::values::cosine::{cosine_similarity, ensure_finite, magnitude};
use tracing::warn;

/// Exact nearest-neighbour search over a borrowed store.
///
/// Every query scans all records, so cost is linear in the store size.
/// The engine only reads; holding it keeps the store immutable.
pub struct SearchEngine<'a, S: VectorStore + ?Sized> {
    store: &'a S,
}

pub(crate) struct Scored<'a> {
    pub id: &'a str,
    pub score: f64,
    pub record: &'a VectorRecord,
}

impl<'a, S: VectorStore + ?Sized> SearchEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Top `top_k` records by descending cosine similarity to `query`.
    /// Equal scores keep insertion order.
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        filter: Option<MetadataFilter<'_>>,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        if top_k == 0 || !self.check_query(query)? {
            return Ok(vec![]);
        }
        let scored = self.score_all(query, filter, None)?;
        Ok(Self::top(scored, top_k))
    }

    /// Like [`search`](Self::search) with a stored record as the query.
    /// The record itself never appears in its own results.
    pub fn search_by_id(
        &self,
        vector_id: &str,
        top_k: usize,
        filter: Option<MetadataFilter<'_>>,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        let query = self.store.get_vector_data(vector_id)?;
        if top_k == 0 {
            return Ok(vec![]);
        }
        let scored = self.score_all(&query, filter, Some(vector_id))?;
        Ok(Self::top(scored, top_k))
    }

    /// Runs each query independently. Slot `i` holds the outcome of
    /// `queries[i]`; a failing query does not affect the others.
    pub fn batch_search<V: AsRef<[f32]>>(
        &self,
        queries: &[V],
        top_k: usize,
        filter: Option<MetadataFilter<'_>>,
    ) -> Vec<Result<Vec<SearchResult>, VectorDbError>> {
        queries
            .iter()
            .map(|q| self.search(q.as_ref(), top_k, filter))
            .collect()
    }

    /// Keyed form of [`batch_search`](Self::batch_search).
    pub fn batch_search_named<K: AsRef<str>, V: AsRef<[f32]>>(
        &self,
        queries: &[(K, V)],
        top_k: usize,
        filter: Option<MetadataFilter<'_>>,
    ) -> Vec<(String, Result<Vec<SearchResult>, VectorDbError>)> {
        queries
            .iter()
            .map(|(key, q)| (key.as_ref().to_string(), self.search(q.as_ref(), top_k, filter)))
            .collect()
    }

    /// `Ok(false)` when the store has no dimension yet and so nothing to score.
    pub(crate) fn check_query(&self, query: &[f32]) -> Result<bool, VectorDbError> {
        match self.store.dimension() {
            None => Ok(false),
            Some(dim) if query.len() != dim => Err(VectorDbError::dimension(dim, query.len())),
            Some(_) => Ok(true),
        }
    }

    /// Scores every candidate in insertion order. Stored zero vectors are
    /// skipped with a warning; a zero or non-finite query is an error.
    pub(crate) fn score_all(
        &self,
        query: &[f32],
        filter: Option<MetadataFilter<'_>>,
        exclude: Option<&str>,
    ) -> Result<Vec<Scored<'a>>, VectorDbError> {
        ensure_finite(query)?;
        if magnitude(query) == 0.0 {
            return Err(VectorDbError::ZeroVector);
        }
        let mut scored = Vec::new();
        for (id, record) in self.store.records() {
            if exclude == Some(id) {
                continue;
            }
            if let Some(f) = filter {
                if !f(&record.metadata) {
                    continue;
                }
            }
            match cosine_similarity(query, &record.vector) {
                Ok(score) => scored.push(Scored { id, score, record }),
                Err(VectorDbError::ZeroVector) => {
                    warn!(id, "Skipping zero-magnitude vector");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(scored)
    }

    fn top(mut scored: Vec<Scored<'_>>, top_k: usize) -> Vec<SearchResult> {
        // stable sort: ties stay in insertion order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
            .into_iter()
            .take(top_k)
            .map(|s| SearchResult {
                id: s.id.to_string(),
                score: s.score,
                metadata: s.record.metadata.clone(),
            })
            .collect()
    }
}
