//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Registration of the command list in the Telegram UI

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::Config;
use crate::telegram::Bot;

/// Timeout for Bot API requests; long polling waits up to 30s on its own
const BOT_API_TIMEOUT_SECS: u64 = 60;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды Gladiator Arena:")]
pub enum Command {
    #[command(description = "начать игру")]
    Start,
    #[command(description = "ваша статистика")]
    Stats,
    #[command(description = "рейтинг игроков")]
    Leaderboard,
    #[command(description = "справка")]
    Help,
    #[command(description = "ежедневная награда")]
    Daily,
}

/// Creates a Bot instance from the configured token
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client or parse BOT_API_URL
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new()
        .timeout(std::time::Duration::from_secs(BOT_API_TIMEOUT_SECS))
        .build()?;
    let bot = Bot::with_client(config.bot_token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
