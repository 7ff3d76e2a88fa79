//! HTTP API server for persona-quiz.
//!
//! Serves the quiz catalog, scores submitted answers and exposes the history
//! log as JSON over axum. One [`AppState`] shares a single history store
//! between all handlers.

mod config;
mod error;
mod logging;
mod routes;
mod state;

pub use config::{Config, ConfigError, CorsConfig, LogFormat, LoggingConfig, ServerConfig, StoreConfig};
pub use error::ApiError;
pub use logging::{LoggingError, init as init_logging};
pub use routes::router;
pub use state::{AppState, SharedStore, StateError};
