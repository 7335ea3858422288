//! # Data Loader Crate
//!
//! Loads the precomputed recommendation model: the movie catalog and the
//! pairwise similarity matrix that lines up with it by position.
//!
//! ## Main Components
//!
//! - **types**: Movie, Catalog, SimilarityMatrix, ModelContext
//! - **parser**: Parse the `.dat` artifacts into Rust values
//! - **index**: Load and validate a whole model directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ModelContext;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let model = Arc::new(ModelContext::load_from_dir(Path::new("model"))?);
//! let idx = model.catalog().index_of_title("Avatar").unwrap();
//! let row = model.similarity().row(idx).unwrap();
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{DataLoadError, Result};
pub use index::{DEFAULT_MODEL_DIR, MOVIES_FILE, SIMILARITY_FILE};
pub use types::{Catalog, CatalogIndex, ModelContext, Movie, MovieId, SimilarityMatrix};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.index_of_title("anything").is_none());
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let catalog = Catalog::new(vec![
            Movie::new(10, "Heat"),
            Movie::new(20, "Alien"),
            Movie::new(30, "Heat"),
        ]);

        assert_eq!(catalog.index_of_title("Heat"), Some(0));
        assert_eq!(catalog.duplicate_titles(), ["Heat".to_string()]);
        assert_eq!(catalog.get(2).map(|m| m.id), Some(30));
    }

    #[test]
    fn test_matrix_rejects_non_square() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(err, DataLoadError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_matrix_rejects_negative_and_nan() {
        let negative = SimilarityMatrix::from_rows(vec![vec![1.0, -0.1], vec![-0.1, 1.0]]);
        assert!(matches!(negative, Err(DataLoadError::InvalidValue { .. })));

        let nan = SimilarityMatrix::from_rows(vec![vec![f32::NAN]]);
        assert!(matches!(nan, Err(DataLoadError::InvalidValue { .. })));
    }

    #[test]
    fn test_matrix_rows() {
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.25], vec![0.25, 1.0]]).unwrap();

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.row(1), Some(&[0.25, 1.0][..]));
        assert!(matrix.row(2).is_none());
        assert_eq!(matrix.get(0, 1), Some(0.25));
    }
}
