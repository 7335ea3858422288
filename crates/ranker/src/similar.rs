//! Similarity Ranker - top-K neighbours from the precomputed matrix
//!
//! ## Algorithm
//! 1. Resolve the query title to its catalog index `q`
//! 2. Pair every column of row `q` with its score
//! 3. Stable sort by score, highest first (ties keep catalog order)
//! 4. Remove `q` itself and keep the first `k`

use crate::error::{RankError, Result};
use crate::types::Neighbor;
use data_loader::{CatalogIndex, ModelContext};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of neighbours returned when the caller does not ask for a size
pub const DEFAULT_K: usize = 6;

/// Looks up the nearest neighbours of a movie in the similarity matrix
#[derive(Clone)]
pub struct SimilarityRanker {
    /// Shared reference to the loaded model (read-only, so no Mutex needed)
    model: Arc<ModelContext>,
}

impl SimilarityRanker {
    pub fn new(model: Arc<ModelContext>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<ModelContext> {
        &self.model
    }

    /// Catalog index for an exact title match
    ///
    /// Duplicate titles resolve to their first catalog position.
    pub fn resolve(&self, title: &str) -> Result<CatalogIndex> {
        self.model
            .catalog()
            .index_of_title(title)
            .ok_or_else(|| RankError::NotFound {
                title: title.to_string(),
            })
    }

    /// The `k` movies most similar to `title`, best first
    ///
    /// Returns `min(k, catalog_len - 1)` neighbours and never the query movie.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Neighbor>> {
        let query = self.resolve(title)?;
        let neighbors = self.neighbors_of(query, k);
        debug!("Ranked {} neighbours for catalog index {}", neighbors.len(), query);
        Ok(neighbors)
    }

    /// Top-`k` neighbours of the movie at catalog position `query`
    ///
    /// An out-of-range index yields no neighbours.
    pub fn neighbors_of(&self, query: CatalogIndex, k: usize) -> Vec<Neighbor> {
        let Some(row) = self.model.similarity().row(query) else {
            return Vec::new();
        };

        let mut scored: Vec<(CatalogIndex, f32)> = row.iter().copied().enumerate().collect();

        // sort_by is stable: equal scores stay in catalog order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let catalog = self.model.catalog();
        scored
            .into_iter()
            .filter(|&(index, _)| index != query)
            .take(k)
            .filter_map(|(index, score)| {
                let movie = catalog.get(index)?;
                Some(Neighbor {
                    index,
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                })
            })
            .collect()
    }
}
