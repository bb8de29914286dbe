//! Inline keyboard layouts

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, UserId, WebAppInfo};
use url::Url;

use super::callback::MenuCallback;

fn cb(text: &str, callback: MenuCallback) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, callback.data())
}

fn web_app(text: &str, url: Url) -> InlineKeyboardButton {
    InlineKeyboardButton::web_app(text, WebAppInfo { url })
}

fn back_row() -> Vec<InlineKeyboardButton> {
    vec![cb("◀️ Назад", MenuCallback::BackToMain)]
}

/// Web App deep link with extra query parameters appended to `WEBAPP_URL`
pub fn webapp_link(webapp_url: &Url, params: &[(&str, &str)]) -> Url {
    let mut url = webapp_url.clone();
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url
}

/// Main menu: open game / stats + leaderboard / help + developer
pub fn main_menu(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![web_app("🎮 Открыть игру", webapp_url.clone())],
        vec![
            cb("📊 Статистика", MenuCallback::Stats),
            cb("🏆 Рейтинг", MenuCallback::Leaderboard),
        ],
        vec![
            cb("❓ Помощь", MenuCallback::Help),
            cb("👨‍💻 Разработчик", MenuCallback::Developer),
        ],
    ])
}

pub fn player_stats(webapp_url: &Url, user_id: UserId) -> InlineKeyboardMarkup {
    let link = webapp_link(webapp_url, &[("tgId", &user_id.0.to_string())]);
    InlineKeyboardMarkup::new(vec![vec![web_app("🎮 Продолжить игру", link)], back_row()])
}

pub fn onboarding(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![web_app("🎮 Начать игру", webapp_url.clone())]])
}

pub fn back_only() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_row()])
}

pub fn leaderboard(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![web_app("🎮 Играть", webapp_url.clone())],
        vec![cb("📊 Моя статистика", MenuCallback::Stats)],
        back_row(),
    ])
}

pub fn help(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![web_app("🎮 Начать игру", webapp_url.clone())],
        vec![cb("👨‍💻 Разработчик", MenuCallback::Developer)],
        back_row(),
    ])
}

pub fn developer(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![web_app("🎮 Вернуться к игре", webapp_url.clone())],
        vec![cb("📊 Статистика", MenuCallback::Stats)],
        back_row(),
    ])
}

pub fn daily_reward(webapp_url: &Url) -> InlineKeyboardMarkup {
    let link = webapp_link(webapp_url, &[("daily", "true")]);
    InlineKeyboardMarkup::new(vec![vec![web_app("🎮 Получить награду", link)]])
}
