use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tokio_util::sync::CancellationToken;

use arena_bot::cli::{Cli, Commands};
use arena_bot::core::{init_logger, AppResult, Config};
use arena_bot::game_api::GameApiClient;
use arena_bot::telegram::notifications::{start_battle_notifier, start_daily_reward_reminder};
use arena_bot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (configuration, logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env()?;
    init_logger(config.log_file_path.as_deref())?;

    if config.uses_placeholder_token() {
        log::warn!("BOT_TOKEN is not set, using the placeholder token; Telegram will reject every request");
    }

    match cli.command {
        Some(Commands::Run) => run_bot(config).await?,
        Some(Commands::SetCommands) => run_set_commands(&config).await?,
        Some(Commands::CheckConfig) => println!("{}", config.summary()),
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(config).await?
        }
    }

    Ok(())
}

/// Registers the command list with Telegram and exits
async fn run_set_commands(config: &Config) -> AppResult<()> {
    let bot = create_bot(config)?;
    setup_bot_commands(&bot).await?;
    log::info!("Bot commands registered");
    Ok(())
}

/// Runs the bot with long polling until Ctrl+C
async fn run_bot(config: Config) -> AppResult<()> {
    log::info!("Starting Gladiator Arena bot...");
    log::info!("{}", config.summary());

    let bot = create_bot(&config)?;
    let game_api = GameApiClient::new(config.api_url.clone(), config.api_timeout)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let config = Arc::new(config);
    let cancel = CancellationToken::new();
    let daily_reminder = start_daily_reward_reminder(bot.clone(), Arc::clone(&config), cancel.clone());
    let battle_notifier = start_battle_notifier(bot.clone(), Arc::clone(&config), cancel.clone());

    let handler_deps = HandlerDeps::new(Arc::clone(&config), game_api);
    let handler = schema(handler_deps);

    log::info!("📡 Starting bot in long polling mode");
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully, stopping scheduled jobs");
    cancel.cancel();
    for job in [daily_reminder, battle_notifier] {
        if let Err(e) = job.await {
            log::warn!("Scheduled job ended abnormally: {}", e);
        }
    }

    Ok(())
}
