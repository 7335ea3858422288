//! Value types produced by the ranker.

use data_loader::{CatalogIndex, MovieId};
use serde::Serialize;

/// One ranked neighbour of the query movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    /// Position in the catalog (and similarity matrix)
    pub index: CatalogIndex,
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the query movie
    pub score: f32,
}

/// A title search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleMatch {
    pub index: CatalogIndex,
    pub movie_id: MovieId,
    pub title: String,
    /// True when the title equals the query ignoring case
    pub exact: bool,
}
