//! Reporting fetches that ran out of attempts.
//!
//! A terminal fetch failure never aborts a render; it is handed to a
//! `Notifier` so the user can be told, and the caller gets the fallback value.

use data_loader::MovieId;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Which artwork a fetch was after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkKind {
    Poster,
    Backdrop,
}

impl fmt::Display for ArtworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtworkKind::Poster => write!(f, "poster"),
            ArtworkKind::Backdrop => write!(f, "backdrop"),
        }
    }
}

/// All attempts for one artwork fetch failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {kind} for movie ID {movie_id} after {attempts} attempt(s): {last_error}")]
pub struct FetchFailure {
    pub movie_id: MovieId,
    pub kind: ArtworkKind,
    pub attempts: u32,
    /// Rendered error of the final attempt
    pub last_error: String,
}

/// Receives user-visible, non-fatal fetch failures
pub trait Notifier: Send + Sync {
    fn notify(&self, failure: &FetchFailure);
}

/// Logs failures at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, failure: &FetchFailure) {
        error!(
            movie_id = failure.movie_id,
            kind = %failure.kind,
            attempts = failure.attempts,
            "{}",
            failure
        );
    }
}
