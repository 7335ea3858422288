//! Simple test harness for the recommendation orchestrator.
//!
//! Renders one recommendation page end to end against the live metadata API.
//! Usage: `server [TITLE] [MODEL_DIR]` (defaults to "Avatar" and `model`);
//! needs `TMDB_API_KEY`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::{ModelContext, DEFAULT_MODEL_DIR};
use ranker::DEFAULT_K;
use server::RecommendationOrchestrator;
use tmdb_client::{ArtworkFetcher, FetcherConfig, TmdbClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,ranker=debug,tmdb_client=debug")
        .init();

    info!("Starting ReelRecs server test harness");

    let mut args = std::env::args().skip(1);
    let title = args.next().unwrap_or_else(|| "Avatar".to_string());
    let model_dir = args.next().unwrap_or_else(|| DEFAULT_MODEL_DIR.to_string());

    info!("Loading model from {}...", model_dir);
    let model = Arc::new(
        ModelContext::load_from_dir(Path::new(&model_dir)).context("Failed to load model")?,
    );

    let config = FetcherConfig::from_env()?;
    let client = TmdbClient::new(&config)?;
    let fetcher = ArtworkFetcher::new(Arc::new(client), &config);
    let orchestrator = RecommendationOrchestrator::new(model, fetcher);

    info!("Getting recommendations for '{}'", title);
    let page = orchestrator.get_recommendations(&title, DEFAULT_K).await?;

    info!("Backdrop: {}", page.backdrop_url);
    for (i, rec) in page.recommendations.iter().enumerate() {
        info!(
            "{}. {} - Score: {:.3}",
            i + 1,
            rec.title,
            rec.score,
        );
        info!("   Poster: {}", rec.poster_url.as_deref().unwrap_or("(none)"));
        info!("   {}", rec.page_url);
    }

    Ok(())
}
