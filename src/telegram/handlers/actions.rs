//! Menu action handlers
//!
//! Each action renders exactly one [`Screen`]; at most one game API request
//! is made on the way. Fetch failures are turned into user-facing screens
//! here, so only Telegram delivery errors ever leave this module.

use tracing::Instrument;

use super::types::{HandlerDeps, HandlerError, MenuAction, MenuUser, ReplyTarget};
use crate::core::config::leaderboard::LIMIT as LEADERBOARD_LIMIT;
use crate::game_api::{LeaderboardLookup, PlayerLookup, PlayerProfile};
use crate::telegram::markdown::{edit_screen, send_screen};
use crate::telegram::menu::{screens, Screen};
use crate::telegram::Bot;

/// Renders the screen for `action` and delivers it to `target`
pub async fn run_action(
    bot: &Bot,
    deps: &HandlerDeps,
    action: MenuAction,
    requester: &MenuUser,
    target: ReplyTarget,
) -> Result<(), HandlerError> {
    let span = tracing::info_span!("menu_action", %action, user_id = requester.id.0);
    async {
        log::info!("Handling {} for user {}", action, requester.id);
        let screen = render_action(deps, action, requester).await;
        deliver(bot, target, &screen).await
    }
    .instrument(span)
    .await
}

/// Builds the reply for `action` without sending anything
pub async fn render_action(deps: &HandlerDeps, action: MenuAction, requester: &MenuUser) -> Screen {
    let webapp_url = &deps.config.webapp_url;
    match action {
        MenuAction::Start => screens::welcome(&requester.first_name, webapp_url),
        MenuAction::Stats => stats(deps, requester).await,
        MenuAction::Leaderboard => leaderboard(deps).await,
        MenuAction::Help => screens::help(webapp_url),
        MenuAction::Developer => screens::developer(webapp_url),
        MenuAction::BackToMain => screens::main_menu(&requester.first_name, webapp_url),
        MenuAction::DailyReward => screens::daily_reward(webapp_url),
    }
}

/// Profile summary, onboarding prompt for unknown players, or a load error
pub async fn stats(deps: &HandlerDeps, requester: &MenuUser) -> Screen {
    let webapp_url = &deps.config.webapp_url;
    match deps.game_api.fetch_player(requester.id.0).await {
        Ok(PlayerLookup::Found(snapshot)) => {
            let profile = PlayerProfile::from(*snapshot);
            screens::player_stats(&profile, requester.id, webapp_url)
        }
        Ok(PlayerLookup::NotFound(status)) => {
            log::info!("User {} has no player yet ({}), showing onboarding", requester.id, status);
            screens::onboarding(webapp_url)
        }
        Err(e) => {
            log::error!("Error fetching stats: {}", e);
            screens::stats_load_error()
        }
    }
}

/// Top players by fame
pub async fn leaderboard(deps: &HandlerDeps) -> Screen {
    match deps.game_api.fetch_leaderboard(LEADERBOARD_LIMIT).await {
        Ok(LeaderboardLookup::Ranked(entries)) => {
            screens::leaderboard(&entries, LEADERBOARD_LIMIT, &deps.config.webapp_url)
        }
        Ok(LeaderboardLookup::Unavailable(status)) => {
            log::warn!("Leaderboard request answered {}", status);
            screens::leaderboard_error()
        }
        Err(e) => {
            log::error!("Error fetching leaderboard: {}", e);
            screens::leaderboard_error()
        }
    }
}

async fn deliver(bot: &Bot, target: ReplyTarget, screen: &Screen) -> Result<(), HandlerError> {
    match target {
        ReplyTarget::NewMessage(chat_id) => {
            send_screen(bot, chat_id, screen).await?;
        }
        ReplyTarget::Edit { chat_id, message_id } => {
            edit_screen(bot, chat_id, message_id, screen).await?;
        }
    }
    Ok(())
}
