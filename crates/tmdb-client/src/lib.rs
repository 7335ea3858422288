//! Metadata client for fetching movie artwork from TMDB.
//!
//! This crate provides:
//! - `TmdbClient`: one HTTP GET per call against `/movie/{id}`
//! - `ArtworkFetcher`: bounded fixed-interval retries on top of any
//!   `MetadataApi`, with fallbacks when every attempt fails
//! - `FetcherConfig`: settings from `TMDB_*` environment variables
//!
//! Sleeping and failure reporting go through the `Sleeper` and `Notifier`
//! traits so callers (and tests) decide how waits and user notices happen.

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod notify;
pub mod retry;

pub use api::{MetadataApi, MovieDetails, TmdbClient};
pub use config::FetcherConfig;
pub use error::{FetchError, Result};
pub use fetcher::{image_url, ArtworkFetcher, BACKDROP_SIZE, POSTER_SIZE};
pub use notify::{ArtworkKind, FetchFailure, Notifier, TracingNotifier};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
