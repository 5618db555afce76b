use crate::application::search::SearchEngine;
use crate::domain::entities::search_result::SimilarityStats;
use crate::domain::error::VectorDbError;
use crate::domain::ports::vector_store::VectorStore;

impl<S: VectorStore + ?Sized> SearchEngine<'_, S> {
    /// Distribution of similarity scores between `query` and every stored
    /// record. `None` when no record could be scored.
    pub fn get_statistics(&self, query: &[f32]) -> Result<Option<SimilarityStats>, VectorDbError> {
        if !self.check_query(query)? {
            return Ok(None);
        }
        let scored = self.score_all(query, None, None)?;
        if scored.is_empty() {
            return Ok(None);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for s in &scored {
            min = min.min(s.score);
            max = max.max(s.score);
            sum += s.score;
        }

        Ok(Some(SimilarityStats {
            count: scored.len(),
            min,
            max,
            mean: sum / scored.len() as f64,
        }))
    }
}
