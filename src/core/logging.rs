//! Logging initialization
//!
//! Call sites use the `log` facade macros. Records are bridged into a
//! `tracing-subscriber` registry (console, plus an optional log file), so
//! spans opened around menu actions show up next to every line.

use anyhow::Result;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Default filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the level filter from RUST_LOG, falling back to [`DEFAULT_LOG_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize logger for console output and, optionally, a log file
///
/// # Arguments
/// * `log_file_path` - Path to the log file; `None` logs to the console only
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the log file or install the logger
pub fn init_logger(log_file_path: Option<&str>) -> Result<()> {
    let console_layer = fmt::layer().with_target(true).with_filter(env_filter());

    let file_layer = match log_file_path {
        Some(path) => {
            let file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(console_layer).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    // `log` macros are used throughout the crate and by teloxide itself
    tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to bridge log records: {}", e))?;

    Ok(())
}
