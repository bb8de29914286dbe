//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The handlers are organized in a testable way, allowing integration tests
//! to use the same handler tree as production code.

mod actions;
mod errors;
mod schema;
mod types;

pub use actions::{leaderboard, render_action, run_action, stats};
pub use errors::report_handler_error;
pub use schema::{dispatch, schema};
pub use types::{HandlerDeps, HandlerError, MenuAction, MenuUser, ReplyTarget};
