//! Catch-all error handler for menu actions

use teloxide::prelude::*;

use crate::telegram::menu::GENERIC_FAILURE_TEXT;
use crate::telegram::Bot;

/// Logs a handler failure and tells the affected user something went wrong.
///
/// Never fails: when there is no user to notify nothing is sent, and a
/// failed notification is only logged.
pub async fn report_handler_error(bot: &Bot, user_id: Option<UserId>, err: &(dyn std::error::Error + Send + Sync)) {
    log::error!("Exception while handling an update: {}", err);

    let Some(user_id) = user_id else {
        return;
    };

    if let Err(e) = bot.send_message(ChatId::from(user_id), GENERIC_FAILURE_TEXT).await {
        log::warn!("Failed to notify user {} about the error: {}", user_id, e);
    }
}
