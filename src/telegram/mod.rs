//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod markdown;
pub mod menu;
pub mod notifications;

/// Bot type used across handlers
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError, MenuAction, MenuUser, ReplyTarget};
pub use menu::{MenuCallback, Screen};
