//! HTTP front end for the Movie Match recommender.
//!
//! Exposes the recommendation engine over a small JSON API:
//! - `GET /` liveness banner
//! - `GET /health` model size and version
//! - `POST /recommend` ranked movies for a set of liked movie ids

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use handlers::INVALID_BODY;
pub use routes::{build_app, create_router};
pub use state::AppState;
