//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation render:
//! 1. Resolve the selected title in the catalog
//! 2. Fetch the selected movie's backdrop
//! 3. Rank its nearest neighbours
//! 4. Fetch a poster for every neighbour
//!
//! Only step 1 can fail the render. Artwork fetches recover on their own
//! (fallback values) and one failed fetch never affects the others.
//!
//! Poster fetches run one after another by default. `with_fetch_concurrency`
//! opts into a bounded fan-out; results keep rank order either way.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{error, info};

use data_loader::{ModelContext, Movie, MovieId};
use ranker::{Neighbor, SimilarityRanker};
use tmdb_client::ArtworkFetcher;

/// Base URL of the provider's public movie pages
pub const MOVIE_PAGE_BASE: &str = "https://www.themoviedb.org/movie";

/// Public page for a movie on the metadata provider
pub fn movie_page_url(movie_id: MovieId) -> String {
    format!("{}/{}", MOVIE_PAGE_BASE, movie_id)
}

/// One recommended movie, ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    /// `None` when the poster could not be fetched
    pub poster_url: Option<String>,
    pub page_url: String,
}

/// Everything needed to render the result view for a selected title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPage {
    pub selected: Movie,
    pub backdrop_url: String,
    pub recommendations: Vec<MovieRecommendation>,
}

/// Main orchestrator that composes ranking and artwork fetching
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    model: Arc<ModelContext>,
    ranker: SimilarityRanker,
    fetcher: Arc<ArtworkFetcher>,
    fetch_concurrency: usize,
}

impl RecommendationOrchestrator {
    /// Sequential orchestrator over a loaded model
    pub fn new(model: Arc<ModelContext>, fetcher: ArtworkFetcher) -> Self {
        Self {
            ranker: SimilarityRanker::new(model.clone()),
            model,
            fetcher: Arc::new(fetcher),
            fetch_concurrency: 1,
        }
    }

    /// Allow up to `limit` poster fetches in flight at once (minimum 1)
    pub fn with_fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = limit.max(1);
        self
    }

    /// Main entry point: recommendations for an exact catalog title
    ///
    /// Fails only when the title is not in the catalog (`RankError::NotFound`
    /// is the root cause).
    pub async fn get_recommendations(&self, title: &str, limit: usize) -> Result<RecommendationPage> {
        let start_time = Instant::now();

        let query = self.ranker.resolve(title)?;
        let selected = self
            .model
            .catalog()
            .get(query)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Catalog index {} out of range", query))?;

        let backdrop_url = self.fetcher.fetch_backdrop_url(selected.id).await;

        let neighbors = self.ranker.neighbors_of(query, limit);
        info!("Ranked {} neighbours for '{}'", neighbors.len(), selected.title);

        let posters = self.fetch_posters(&neighbors).await;

        let recommendations: Vec<MovieRecommendation> = neighbors
            .into_iter()
            .zip(posters)
            .map(|(neighbor, poster_url)| MovieRecommendation {
                page_url: movie_page_url(neighbor.movie_id),
                movie_id: neighbor.movie_id,
                title: neighbor.title,
                score: neighbor.score,
                poster_url,
            })
            .collect();

        let missing = recommendations.iter().filter(|r| r.poster_url.is_none()).count();
        info!(
            "Rendered {} recommendations for '{}' ({} without poster) in {:.2?}",
            recommendations.len(),
            selected.title,
            missing,
            start_time.elapsed()
        );

        Ok(RecommendationPage {
            selected,
            backdrop_url,
            recommendations,
        })
    }

    /// Backdrop for an exact catalog title
    pub async fn backdrop_for(&self, title: &str) -> Result<String> {
        let query = self.ranker.resolve(title)?;
        let movie_id = self
            .model
            .catalog()
            .get(query)
            .map(|m| m.id)
            .ok_or_else(|| anyhow::anyhow!("Catalog index {} out of range", query))?;
        Ok(self.fetcher.fetch_backdrop_url(movie_id).await)
    }

    /// One poster per neighbour, in the same order
    async fn fetch_posters(&self, neighbors: &[Neighbor]) -> Vec<Option<String>> {
        if self.fetch_concurrency <= 1 || neighbors.len() <= 1 {
            let mut posters = Vec::with_capacity(neighbors.len());
            for neighbor in neighbors {
                posters.push(self.fetcher.fetch_poster_url(neighbor.movie_id).await);
            }
            return posters;
        }

        let mut posters: Vec<Option<String>> = vec![None; neighbors.len()];
        let mut tasks = JoinSet::new();

        for (slot, neighbor) in neighbors.iter().enumerate() {
            if tasks.len() >= self.fetch_concurrency {
                if let Some(joined) = tasks.join_next().await {
                    store_poster(&mut posters, joined);
                }
            }
            let fetcher = self.fetcher.clone();
            let movie_id = neighbor.movie_id;
            tasks.spawn(async move { (slot, fetcher.fetch_poster_url(movie_id).await) });
        }

        while let Some(joined) = tasks.join_next().await {
            store_poster(&mut posters, joined);
        }

        posters
    }
}

fn store_poster(
    posters: &mut [Option<String>],
    joined: std::result::Result<(usize, Option<String>), tokio::task::JoinError>,
) {
    match joined {
        Ok((slot, poster)) => posters[slot] = poster,
        Err(e) => error!("Poster fetch task failed: {}", e),
    }
}
