use crate::application::search::SearchEngine;
use crate::domain::entities::search_result::DuplicatePair;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::cosine::{cosine_similarity, magnitude};
use tracing::warn;

impl<S: VectorStore + ?Sized> SearchEngine<'_, S> {
    /// Every unordered pair with similarity `>= threshold`, most similar
    /// first. Compares all pairs, so cost is quadratic in the record count.
    /// Zero vectors are skipped with one warning each.
    pub fn find_duplicates(&self, threshold: f64) -> Vec<DuplicatePair> {
        let records: Vec<_> = self
            .store()
            .records()
            .filter(|(id, record)| {
                let usable = magnitude(&record.vector) != 0.0;
                if !usable {
                    warn!(id, "Skipping zero-magnitude vector in duplicate scan");
                }
                usable
            })
            .collect();
        let mut pairs = Vec::new();

        for (i, (first, a)) in records.iter().enumerate() {
            for (second, b) in &records[i + 1..] {
                match cosine_similarity(&a.vector, &b.vector) {
                    Ok(similarity) if similarity >= threshold => pairs.push(DuplicatePair {
                        first: first.to_string(),
                        second: second.to_string(),
                        similarity,
                    }),
                    Ok(_) => {}
                    Err(e) => {
                        warn!(first = *first, second = *second, error = %e, "Skipping pair in duplicate scan");
                    }
                }
            }
        }

        pairs.sort_by(|x, y| y.similarity.total_cmp(&x.similarity));
        pairs
    }
}
