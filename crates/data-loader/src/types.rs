//! Core domain types for the recommendation model.
//!
//! The model is two artifacts built offline: an ordered catalog of movies and
//! a square similarity matrix whose row/column `i` is catalog entry `i`.
//! Both are loaded once and never mutated afterwards.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB movie identifier
pub type MovieId = u32;

/// Position of a movie in the catalog (and row/column in the matrix)
pub type CatalogIndex = usize;

// =============================================================================
// Catalog
// =============================================================================

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Ordered list of movies with an exact-title lookup index.
///
/// Titles are expected to be unique. When they are not, the lookup resolves
/// to the first catalog position carrying that title and the later entries
/// are only reachable by index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    title_index: HashMap<String, CatalogIndex>,
    duplicate_titles: Vec<String>,
}

impl Catalog {
    /// Build a catalog, preserving the given order
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        let mut duplicate_titles = Vec::new();

        for (idx, movie) in movies.iter().enumerate() {
            if title_index.contains_key(&movie.title) {
                duplicate_titles.push(movie.title.clone());
            } else {
                title_index.insert(movie.title.clone(), idx);
            }
        }

        Self {
            movies,
            title_index,
            duplicate_titles,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get a movie by catalog position
    pub fn get(&self, index: CatalogIndex) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Catalog position of the first movie whose title matches exactly
    pub fn index_of_title(&self, title: &str) -> Option<CatalogIndex> {
        self.title_index.get(title).copied()
    }

    /// Titles that appear more than once, one entry per extra occurrence
    pub fn duplicate_titles(&self) -> &[String] {
        &self.duplicate_titles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
///
/// Every score is finite and non-negative; construction rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build from rows, validating shape and values
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(DataLoadError::DimensionMismatch {
                    what: format!("similarity row {}", row_idx),
                    expected: size,
                    found: row.len(),
                });
            }
            for (col_idx, &score) in row.iter().enumerate() {
                if !score.is_finite() || score < 0.0 {
                    return Err(DataLoadError::InvalidValue {
                        field: format!("similarity[{}][{}]", row_idx, col_idx),
                        value: score.to_string(),
                    });
                }
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (equal to the number of columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// All scores of row `index`, or `None` when out of range
    pub fn row(&self, index: CatalogIndex) -> Option<&[f32]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }

    /// Similarity of item `i` to item `j`
    pub fn get(&self, i: CatalogIndex, j: CatalogIndex) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}

// =============================================================================
// ModelContext - the read-only state shared by every request
// =============================================================================

/// Catalog and similarity matrix, checked to line up 1:1 by position.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it.
#[derive(Debug, Clone)]
pub struct ModelContext {
    pub(crate) catalog: Catalog,
    pub(crate) similarity: SimilarityMatrix,
}

impl ModelContext {
    /// Pair a catalog with its matrix, rejecting mismatched dimensions
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if catalog.len() != similarity.size() {
            return Err(DataLoadError::DimensionMismatch {
                what: "similarity matrix vs catalog".to_string(),
                expected: catalog.len(),
                found: similarity.size(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Get counts for debugging/validation: (movies, matrix size)
    pub fn counts(&self) -> (usize, usize) {
        (self.catalog.len(), self.similarity.size())
    }
}
