use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use engine::{DEFAULT_MIN_SEEDS, DEFAULT_TOP_K, EngineConfig};

/// Largest per-request `limit` accepted by default
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// Server configuration, from flags with environment fallbacks
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-match-server")]
#[command(about = "HTTP service serving movie recommendations from a similarity model", long_about = None)]
pub struct ServerConfig {
    /// Directory holding movies.dat and similarity.json
    #[arg(long, env = "MOVIE_MATCH_MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Address to bind
    #[arg(long, env = "MOVIE_MATCH_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Minimum distinct movie ids a request must send
    #[arg(long, env = "MOVIE_MATCH_MIN_SEEDS", default_value_t = DEFAULT_MIN_SEEDS)]
    pub min_seeds: usize,

    /// Recommendations returned when the request sets no limit
    #[arg(long, env = "MOVIE_MATCH_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Upper bound for the `limit` query parameter
    #[arg(long, env = "MOVIE_MATCH_MAX_LIMIT", default_value_t = DEFAULT_MAX_LIMIT)]
    pub max_limit: usize,

    /// Comma-separated allowed CORS origins, or `*` for any
    #[arg(long, env = "MOVIE_MATCH_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Warn at startup if the similarity matrix isn't symmetric
    #[arg(long, env = "MOVIE_MATCH_CHECK_SYMMETRY")]
    pub check_symmetry: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_top_k(self.top_k)
            .with_min_seeds(self.min_seeds)
    }
}
