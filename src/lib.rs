//! Arena Bot - Telegram menu bot for the Gladiator Arena web game
//!
//! The bot is a thin front door to the game: it answers a handful of
//! commands and inline-keyboard callbacks, reads player data from the game
//! backend over HTTP and links every screen to the game's web app.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `game_api`: HTTP client and payload models for the game backend
//! - `telegram`: bot setup, menu screens, handlers and scheduled jobs

pub mod cli;
pub mod core;
pub mod game_api;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult, Config};
pub use game_api::GameApiClient;
pub use telegram::{create_bot, schema, HandlerDeps};
