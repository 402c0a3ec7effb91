//! Top-level error type for the crate.
//!
//! Each layer keeps its own `thiserror` enum; they all convert into
//! [`AppError`] so callers can use `?` across layer boundaries.

pub use crate::config::ConfigError;
pub use crate::feed::FeedError;
pub use crate::state::StateError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failure talking to the feed service.
    #[error("Feed request failed: {0}")]
    Feed(#[from] FeedError),

    /// Event rejected by the controller.
    #[error("Rejected by feed controller: {0}")]
    State(#[from] StateError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not install logger: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;
