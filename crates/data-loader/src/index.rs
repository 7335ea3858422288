//! Building the ModelContext from the artifacts on disk.
//!
//! Steps:
//! 1. Parse movie_list.dat and similarity.dat in parallel
//! 2. Build the catalog and its title index
//! 3. Validate the matrix and pair it with the catalog

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

/// Model directory used when none is given, relative to the working directory
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Catalog artifact file name inside the model directory
pub const MOVIES_FILE: &str = "movie_list.dat";

/// Similarity artifact file name inside the model directory
pub const SIMILARITY_FILE: &str = "similarity.dat";

impl ModelContext {
    /// Load the catalog and similarity matrix from a model directory
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_dir(model_dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {:?}", model_dir);

        let movies_path = model_dir.join(MOVIES_FILE);
        let similarity_path = model_dir.join(SIMILARITY_FILE);

        let (movies, rows) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let movies = movies?;
        let rows = rows?;

        let catalog = Catalog::new(movies);
        if !catalog.duplicate_titles().is_empty() {
            warn!(
                duplicates = catalog.duplicate_titles().len(),
                "Catalog has duplicate titles; lookups resolve to the first occurrence"
            );
        }

        let similarity = SimilarityMatrix::from_rows(rows)?;
        let context = ModelContext::new(catalog, similarity)?;

        let (movies, size) = context.counts();
        info!("Loaded {} movies and a {}x{} similarity matrix", movies, size, size);
        Ok(context)
    }
}
