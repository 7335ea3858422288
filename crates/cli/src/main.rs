use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{ModelContext, DEFAULT_MODEL_DIR};
use ranker::{search_titles, DEFAULT_K};
use server::{RecommendationOrchestrator, RecommendationPage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::{ArtworkFetcher, FetchFailure, FetcherConfig, Notifier, TmdbClient};

/// ReelRecs - Similar Movie Recommender
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Recommend movies similar to a title using a precomputed similarity model", long_about = None)]
struct Cli {
    /// Directory holding movie_list.dat and similarity.dat
    #[arg(short, long, default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_K)]
        limit: usize,

        /// Maximum poster fetches in flight (1 = one after another)
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of hits
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show the backdrop image URL for a title
    Backdrop {
        /// Exact catalog title
        #[arg(long)]
        title: String,
    },

    /// List catalog titles in model order
    List {
        #[arg(long, default_value = "50")]
        limit: usize,
    },
}

/// Prints artwork failures for the user; the render carries on
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, failure: &FetchFailure) {
        eprintln!("{} {}", "warning:".yellow().bold(), failure);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    eprintln!("Loading model from {}...", cli.model_dir.display());
    let start = Instant::now();
    let model = Arc::new(
        ModelContext::load_from_dir(&cli.model_dir).context("Failed to load recommendation model")?,
    );
    eprintln!("{} Loaded model in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            concurrency,
            json,
        } => handle_recommend(model, &title, limit, concurrency, json).await?,
        Commands::Search { title, limit } => handle_search(&model, &title, limit),
        Commands::Backdrop { title } => handle_backdrop(model, &title).await?,
        Commands::List { limit } => handle_list(&model, limit),
    }

    Ok(())
}

/// Orchestrator backed by the live metadata API
fn build_orchestrator(model: Arc<ModelContext>) -> Result<RecommendationOrchestrator> {
    let config = FetcherConfig::from_env().context("Set TMDB_API_KEY (or add it to .env)")?;
    let client = TmdbClient::new(&config).context("Failed to build metadata client")?;
    let fetcher =
        ArtworkFetcher::new(Arc::new(client), &config).with_notifier(Arc::new(ConsoleNotifier));
    Ok(RecommendationOrchestrator::new(model, fetcher))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    model: Arc<ModelContext>,
    title: &str,
    limit: usize,
    concurrency: usize,
    json: bool,
) -> Result<()> {
    let orchestrator = build_orchestrator(model)?.with_fetch_concurrency(concurrency);
    let page = orchestrator.get_recommendations(title, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(model: &ModelContext, title: &str, limit: usize) {
    let hits = search_titles(model.catalog(), title, limit);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if hits.is_empty() {
        println!("  (no matches)");
        return;
    }
    for hit in hits {
        let marker = if hit.exact { "•".green() } else { "•".normal() };
        println!("{} {} [{}]", marker, hit.title, hit.movie_id);
    }
}

/// Handle the 'backdrop' command
async fn handle_backdrop(model: Arc<ModelContext>, title: &str) -> Result<()> {
    let orchestrator = build_orchestrator(model)?;
    let url = orchestrator.backdrop_for(title).await?;
    println!("{}", url);
    Ok(())
}

/// Handle the 'list' command
fn handle_list(model: &ModelContext, limit: usize) {
    let catalog = model.catalog();
    for movie in catalog.iter().take(limit) {
        println!("{:>8}  {}", movie.id, movie.title);
    }
    if catalog.len() > limit {
        println!("... and {} more", catalog.len() - limit);
    }
}

/// Helper function to format and print a recommendation page
fn print_page(page: &RecommendationPage) {
    println!(
        "{}",
        format!("Movies similar to {}:", page.selected.title).bold().blue()
    );
    println!("{}Backdrop: {}", "• ".cyan(), page.backdrop_url);

    for (i, rec) in page.recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.score
        );
        match &rec.poster_url {
            Some(url) => println!("   Poster: {}", url),
            None => println!("   Poster: {}", "unavailable".dimmed()),
        }
        println!("   {}", rec.page_url);
    }
}
