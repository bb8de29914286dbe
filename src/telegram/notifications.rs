//! Scheduled notifications
//!
//! Two background jobs run next to the dispatcher:
//! - the daily reward reminder, once a day at a fixed UTC hour
//! - the battle notification, on a fixed interval
//!
//! Both stop when the shared cancellation token fires.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use teloxide::prelude::*;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::core::config::{schedule, Config};
use crate::telegram::markdown::send_screen;
use crate::telegram::menu::screens;
use crate::telegram::Bot;

/// Next moment the daily job should fire: today at `hour:00` UTC if that is
/// still ahead of `now`, otherwise tomorrow.
pub fn next_daily_run(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    match now.date_naive().and_hms_opt(hour, 0, 0) {
        Some(today) => {
            let today = today.and_utc();
            if today > now {
                today
            } else {
                today + ChronoDuration::days(1)
            }
        }
        None => now + ChronoDuration::days(1),
    }
}

/// Sends the daily reward reminder to every configured chat.
///
/// Returns the number of chats that received it.
pub async fn send_daily_reminders(bot: &Bot, config: &Config) -> usize {
    let screen = screens::daily_reward(&config.webapp_url);
    let mut delivered = 0;

    for &chat_id in &config.daily_reminder_chat_ids {
        match send_screen(bot, ChatId(chat_id), &screen).await {
            Ok(_) => delivered += 1,
            Err(e) => log::warn!("Failed to send daily reward reminder to {}: {}", chat_id, e),
        }
    }

    log::info!(
        "Daily reward reminder delivered to {}/{} chats",
        delivered,
        config.daily_reminder_chat_ids.len()
    );
    delivered
}

/// Battle notification job body.
///
/// Players who have not fought today would be nudged here; the game API does
/// not expose that list yet, so the job only records that it ran.
pub async fn battle_notification(_bot: &Bot, _config: &Config) {
    log::debug!("Battle notification tick: no recipients available");
}

/// Starts the daily reward reminder background task
pub fn start_daily_reward_reminder(bot: Bot, config: Arc<Config>, cancel: CancellationToken) -> JoinHandle<()> {
    log::info!(
        "Daily reward reminder scheduled at {:02}:00 UTC for {} chat(s)",
        config.daily_reminder_hour,
        config.daily_reminder_chat_ids.len()
    );

    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_daily_run(now, config.daily_reminder_hour);
            let wait = (next - now).to_std().unwrap_or_default();
            log::debug!("Next daily reward reminder at {}", next);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(wait) => {}
            }

            send_daily_reminders(&bot, &config).await;
        }
        log::info!("Daily reward reminder stopped");
    })
}

/// Starts the periodic battle notification background task
pub fn start_battle_notifier(bot: Bot, config: Arc<Config>, cancel: CancellationToken) -> JoinHandle<()> {
    let period = config.battle_notify_interval;
    log::info!("Battle notifier started (every {}s)", period.as_secs());

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + schedule::battle_first_delay(), period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => battle_notification(&bot, &config).await,
            }
        }
        log::info!("Battle notifier stopped");
    })
}
