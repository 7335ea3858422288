//! # Ranker Crate
//!
//! Turns a selected title into its most similar movies using the
//! precomputed similarity matrix.
//!
//! ## Components
//!
//! ### SimilarityRanker
//! Resolves an exact title and returns the top-K neighbours of its matrix
//! row, best first, never including the query itself.
//!
//! ### Title search
//! Case-insensitive substring search used to find the exact title to rank.
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranker::{SimilarityRanker, DEFAULT_K};
//!
//! let ranker = SimilarityRanker::new(model.clone());
//! for neighbor in ranker.recommend("Avatar", DEFAULT_K)? {
//!     println!("{} ({:.3})", neighbor.title, neighbor.score);
//! }
//! ```

pub mod error;
pub mod search;
pub mod similar;
pub mod types;

pub use error::{RankError, Result};
pub use search::search_titles;
pub use similar::{SimilarityRanker, DEFAULT_K};
pub use types::{Neighbor, TitleMatch};
