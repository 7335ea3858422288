//! Artwork fetcher with bounded retries and fallbacks
//!
//! Per call:
//! ATTEMPT(1) -> success: RETURN
//!            -> failure: n < max ? WAIT, ATTEMPT(n + 1) : FAIL_TERMINAL
//!
//! On FAIL_TERMINAL the notifier is told, then posters fall back to `None`
//! and backdrops to the configured default image.

use crate::api::{MetadataApi, MovieDetails};
use crate::config::FetcherConfig;
use crate::notify::{ArtworkKind, FetchFailure, Notifier, TracingNotifier};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use data_loader::MovieId;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Image size segment for posters
pub const POSTER_SIZE: &str = "w500";

/// Image size segment for backdrops
pub const BACKDROP_SIZE: &str = "original";

/// Join image base, size and TMDB file path with exactly one `/` between them
pub fn image_url(image_base: &str, size: &str, file_path: &str) -> String {
    format!(
        "{}/{}/{}",
        image_base.trim_end_matches('/'),
        size,
        file_path.trim_start_matches('/')
    )
}

/// A usable file path, or `None` for absent/blank ones
fn file_path(path: Option<&str>) -> Option<&str> {
    path.map(str::trim)
        .filter(|p| !p.trim_start_matches('/').is_empty())
}

/// Fetches poster and backdrop URLs for movies
#[derive(Clone)]
pub struct ArtworkFetcher {
    api: Arc<dyn MetadataApi>,
    sleeper: Arc<dyn Sleeper>,
    notifier: Arc<dyn Notifier>,
    policy: RetryPolicy,
    image_base: String,
    fallback_backdrop_url: String,
}

impl ArtworkFetcher {
    /// Fetcher with real sleeps and log-only notifications
    pub fn new(api: Arc<dyn MetadataApi>, config: &FetcherConfig) -> Self {
        Self {
            api,
            sleeper: Arc::new(TokioSleeper),
            notifier: Arc::new(TracingNotifier),
            policy: RetryPolicy::from(config),
            image_base: config.image_base.clone(),
            fallback_backdrop_url: config.fallback_backdrop_url.clone(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fallback_backdrop_url(&self) -> &str {
        &self.fallback_backdrop_url
    }

    /// Poster URL, or `None` if it could not be obtained
    ///
    /// A reachable service that has no poster for the movie also yields
    /// `None`, without retrying.
    #[instrument(skip(self))]
    pub async fn fetch_poster_url(&self, movie_id: MovieId) -> Option<String> {
        let details = match self.fetch_details(movie_id, ArtworkKind::Poster).await {
            Ok(details) => details,
            Err(failure) => {
                self.notifier.notify(&failure);
                return None;
            }
        };

        match file_path(details.poster_path.as_deref()) {
            Some(path) => Some(image_url(&self.image_base, POSTER_SIZE, path)),
            None => {
                warn!(movie_id, "Metadata has no poster_path");
                None
            }
        }
    }

    /// Backdrop URL, or the fallback image; never empty
    #[instrument(skip(self))]
    pub async fn fetch_backdrop_url(&self, movie_id: MovieId) -> String {
        let details = match self.fetch_details(movie_id, ArtworkKind::Backdrop).await {
            Ok(details) => details,
            Err(failure) => {
                self.notifier.notify(&failure);
                return self.fallback_backdrop_url.clone();
            }
        };

        match file_path(details.backdrop_path.as_deref()) {
            Some(path) => image_url(&self.image_base, BACKDROP_SIZE, path),
            None => {
                debug!(movie_id, "No backdrop_path, using fallback");
                self.fallback_backdrop_url.clone()
            }
        }
    }

    /// Run the attempt loop for one movie
    async fn fetch_details(
        &self,
        movie_id: MovieId,
        kind: ArtworkKind,
    ) -> Result<MovieDetails, FetchFailure> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.api.movie_details(movie_id).await {
                Ok(details) => {
                    debug!(movie_id, attempt, "Fetched metadata");
                    return Ok(details);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        movie_id,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Metadata fetch failed, retrying in {:?}",
                        self.policy.backoff
                    );
                    self.sleeper.sleep(self.policy.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(FetchFailure {
                        movie_id,
                        kind,
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }
}
