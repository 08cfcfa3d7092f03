use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{MovieId, SimilarityIndex, SimilarityStore};
use engine::{DEFAULT_MIN_SEEDS, EngineConfig, Recommendation, RecommendationEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// Movie Match - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-match")]
#[command(about = "Movie recommendations from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and similarity.json
    #[arg(short, long, default_value = "model")]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a set of liked movies
    Recommend {
        /// Comma-separated ids of liked movies
        #[arg(long, value_delimiter = ',', required = true)]
        movie_ids: Vec<MovieId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Minimum number of distinct movie ids required
        #[arg(long, default_value_t = DEFAULT_MIN_SEEDS)]
        min_seeds: usize,

        /// Show the aggregate similarity score for each recommendation
        #[arg(long)]
        scores: bool,

        /// Print JSON instead of a formatted list
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show the nearest neighbours of one movie
    Similar {
        /// Movie to find neighbours for
        #[arg(long)]
        movie_id: MovieId,

        /// Number of neighbours to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Seed movies per request
        #[arg(long, default_value = "5")]
        seeds: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load the similarity model (this may take a moment)
    eprintln!("Loading similarity model from {}...", cli.model_dir.display());
    let start = Instant::now();
    let index = Arc::new(
        SimilarityIndex::load_from_files(&cli.model_dir)
            .context("Failed to load similarity model")?,
    );
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        index.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            movie_ids,
            limit,
            min_seeds,
            scores,
            json,
        } => handle_recommend(index, &movie_ids, limit, min_seeds, scores, json)?,
        Commands::Search { title } => handle_search(&index, &title),
        Commands::Similar { movie_id, limit } => handle_similar(index, movie_id, limit)?,
        Commands::Benchmark {
            requests,
            concurrent,
            seeds,
        } => handle_benchmark(index, requests, concurrent, seeds).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    index: Arc<SimilarityIndex>,
    movie_ids: &[MovieId],
    limit: usize,
    min_seeds: usize,
    show_scores: bool,
    json: bool,
) -> Result<()> {
    for &movie_id in movie_ids {
        if index.index_of(movie_id).is_none() {
            eprintln!("{} movie {} is not in the model, skipping", "!".yellow(), movie_id);
        }
    }

    let engine = RecommendationEngine::with_config(
        index,
        EngineConfig::default().with_min_seeds(min_seeds),
    );
    let recommendations = engine.recommend_with(movie_ids, limit, min_seeds)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        println!("{}", "Movie Recommendations:".bold().blue());
        print_recommendations(&recommendations, show_scores);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: &SimilarityIndex, title: &str) {
    let matches = index.search_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }
    for movie in matches.iter().take(20) {
        println!("{}: {}", movie.id.to_string().green(), movie.title);
    }
    if matches.len() > 20 {
        println!("  ... and {} more", matches.len() - 20);
    }
}

/// Handle the 'similar' command
fn handle_similar(index: Arc<SimilarityIndex>, movie_id: MovieId, limit: usize) -> Result<()> {
    let movie = index
        .get_movie(movie_id)
        .ok_or_else(|| anyhow!("Movie {} not found", movie_id))?
        .clone();

    let engine = RecommendationEngine::new(index);
    let neighbours = engine.similar_to(movie_id, limit)?;

    println!("{}", format!("Movies similar to {}:", movie.title).bold().blue());
    print_recommendations(&neighbours, true);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    index: Arc<SimilarityIndex>,
    requests: usize,
    concurrent: usize,
    seeds_per_request: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be at least 1");
    }
    if index.is_empty() {
        bail!("Cannot benchmark an empty model");
    }

    let engine = RecommendationEngine::new(Arc::clone(&index));

    // Random seed sets drawn from the catalogue
    let catalogue = index.movies();
    let seed_sets: Vec<Vec<MovieId>> = (0..requests)
        .map(|_| {
            (0..seeds_per_request.max(1))
                .map(|_| catalogue[rand::random::<u32>() as usize % catalogue.len()].id)
                .collect()
        })
        .collect();

    // Bound in-flight requests with a semaphore
    let permits = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for seeds in seed_sets {
        let engine = engine.clone();
        let permits = Arc::clone(&permits);
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            let recs = tokio::task::spawn_blocking(move || engine.recommend(&seeds)).await??;
            debug!("Benchmark request returned {} movies", recs.len());
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], show_scores: bool) {
    if recommendations.is_empty() {
        println!("  (no recommendations)");
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        let rank = i + 1;
        if show_scores {
            println!(
                "{}. {} [{}] - Score: {:.3}",
                rank.to_string().green(),
                rec.title,
                rec.movie_id,
                rec.score
            );
        } else {
            println!("{}. {} [{}]", rank.to_string().green(), rec.title, rec.movie_id);
        }
    }
}
