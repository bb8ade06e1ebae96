//! inception-status: a status endpoint for the infra-inception app.
//!
//! Reports the configured database host and whether the Redis cache answers a
//! `PING`, as a small plain-text body served on every GET path.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod status;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
