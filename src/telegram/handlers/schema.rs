//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::actions::run_action;
use super::errors::report_handler_error;
use super::types::{HandlerDeps, HandlerError, MenuAction, MenuUser, ReplyTarget};
use crate::telegram::bot::Command;
use crate::telegram::menu::MenuCallback;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same tree is used in production and in integration tests.
///
/// # Arguments
/// * `deps` - Handler dependencies (configuration, game API client)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(callback_handler(deps_callback))
}

/// Handler for bot commands (/start, /stats, /leaderboard, /help, /daily)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let Some(requester) = MenuUser::from_message(&msg) else {
                    log::debug!("Ignoring {:?} without a sender in chat {}", cmd, msg.chat.id);
                    return Ok(());
                };

                let action = MenuAction::from(cmd);
                let target = ReplyTarget::for_command(&msg, &requester, action);
                dispatch(&bot, &deps, action, &requester, target).await;
                Ok(())
            }
        },
    ))
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            // Stop the client-side spinner before doing any work
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::debug!("Failed to answer callback query: {}", e);
            }

            let Some(callback) = q.data.as_deref().and_then(MenuCallback::parse) else {
                log::debug!("Ignoring unknown callback data {:?} from user {}", q.data, q.from.id);
                return Ok(());
            };

            let requester = MenuUser::from_user(&q.from);
            let target = ReplyTarget::for_callback(&q);
            dispatch(&bot, &deps, MenuAction::from(callback), &requester, target).await;
            Ok(())
        }
    })
}

/// Runs one action and routes any failure to the error handler
pub async fn dispatch(bot: &Bot, deps: &HandlerDeps, action: MenuAction, requester: &MenuUser, target: ReplyTarget) {
    if let Err(e) = run_action(bot, deps, action, requester, target).await {
        report_handler_error(bot, Some(requester.id), e.as_ref()).await;
    }
}
