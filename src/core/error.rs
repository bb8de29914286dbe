use thiserror::Error;

use crate::core::config::ConfigError;
use crate::game_api::GameApiError;

/// Centralized error types for the application
///
/// Startup paths and the binary convert into this enum; request handlers use
/// the boxed `HandlerError` that teloxide handler trees expect.
///
/// # Example
///
/// ```no_run
/// use arena_bot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Game API errors (transport, decoding)
    #[error("Game API error: {0}")]
    GameApi(#[from] GameApiError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
