//! Message text for every menu screen (MarkdownV2)
//!
//! All functions here are pure: they take already-fetched data and return a
//! [`Screen`]. Dynamic values are escaped before interpolation.

use chrono::{DateTime, NaiveDateTime, Utc};
use indoc::{formatdoc, indoc};
use teloxide::types::{InlineKeyboardMarkup, UserId};
use teloxide::utils::markdown::escape;
use url::Url;

use super::keyboards;
use crate::game_api::{LeaderboardEntry, PlayerProfile};

/// Plain-text reply sent by the error handler (no parse mode)
pub const GENERIC_FAILURE_TEXT: &str = "❌ Произошла ошибка. Пожалуйста, попробуйте позже.";

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// A rendered reply: MarkdownV2 text plus its inline keyboard
#[derive(Debug, Clone)]
pub struct Screen {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
    pub disable_link_preview: bool,
}

impl Screen {
    pub fn new(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard,
            disable_link_preview: false,
        }
    }

    /// Screen from unformatted text; the whole text gets escaped
    pub fn plain(text: &str, keyboard: InlineKeyboardMarkup) -> Self {
        Self::new(escape(text), keyboard)
    }

    fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

/// `/start`
pub fn welcome(first_name: &str, webapp_url: &Url) -> Screen {
    let text = formatdoc!(
        r"
        🏛️ *Добро пожаловать в Gladiator Arena, {name}\!*

        *Создайте свою школу гладиаторов и станьте легендой арены\!*

        ⚔️ *Основные возможности:*
        • Нанимайте и тренируйте гладиаторов
        • Участвуйте в эпических боях
        • Зарабатывайте золото и славу
        • Улучшайте свою школу
        • Соревнуйтесь с другими игроками

        *Нажмите кнопку ниже, чтобы начать игру\!*",
        name = escape(first_name),
    );
    Screen::new(text, keyboards::main_menu(webapp_url))
}

/// "Back" from any secondary screen
pub fn main_menu(first_name: &str, webapp_url: &Url) -> Screen {
    let text = format!(
        "🏛️ *Gladiator Arena*\n\nПривет, {}\\! Готовы к бою?",
        escape(first_name)
    );
    Screen::new(text, keyboards::main_menu(webapp_url))
}

/// Profile summary for a player the API knows about
pub fn player_stats(profile: &PlayerProfile, user_id: UserId, webapp_url: &Url) -> Screen {
    let last_login = profile
        .last_login
        .as_deref()
        .map(format_last_login)
        .unwrap_or_else(|| "Сегодня".to_string());

    let text = formatdoc!(
        r"
        📊 *Ваша статистика:*

        👤 *Игрок:* {name}
        🏅 *Уровень:* {level}
        ⭐ *Опыт:* {experience}/{goal}
        💰 *Золото:* {gold}
        💎 *Самоцветы:* {gems}
        👑 *Слава:* {fame}
        ⚡ *Энергия:* {energy}/{max_energy}
        ⚔️ *Гладиаторов:* {gladiators}

        *Последний вход:* {last_login}",
        name = escape(&profile.first_name),
        level = number(profile.level),
        experience = number(profile.experience),
        goal = number(profile.experience_goal()),
        gold = number(profile.gold),
        gems = number(profile.gems),
        fame = number(profile.fame),
        energy = number(profile.energy),
        max_energy = number(profile.max_energy),
        gladiators = profile.gladiator_count,
        last_login = escape(&last_login),
    );
    Screen::new(text, keyboards::player_stats(webapp_url, user_id))
}

/// Shown when the API has no player for this user yet
pub fn onboarding(webapp_url: &Url) -> Screen {
    Screen::plain(
        "❌ Вы еще не начали игру! Нажмите кнопку ниже, чтобы создать своего первого гладиатора.",
        keyboards::onboarding(webapp_url),
    )
}

pub fn stats_load_error() -> Screen {
    Screen::plain("❌ Ошибка загрузки статистики. Попробуйте позже.", keyboards::back_only())
}

/// Top players in the order the API returned them, capped at `limit`
pub fn leaderboard(entries: &[LeaderboardEntry], limit: usize, webapp_url: &Url) -> Screen {
    let mut text = format!("🏆 *Топ {} игроков по славе:*\n\n", limit);

    if entries.is_empty() {
        text.push_str("Пока никто не заработал славы\\. Станьте первым\\!");
    }

    for (index, entry) in entries.iter().take(limit).enumerate() {
        let rank = match MEDALS.get(index) {
            Some(medal) => (*medal).to_string(),
            None => format!("{}\\.", index + 1),
        };
        text.push_str(&format!(
            "{} *{}* \\- {} славы\n",
            rank,
            escape(entry.display_name()),
            number(entry.fame())
        ));
    }

    Screen::new(text, keyboards::leaderboard(webapp_url))
}

pub fn leaderboard_error() -> Screen {
    Screen::plain("❌ Ошибка загрузки рейтинга. Попробуйте позже.", keyboards::back_only())
}

pub fn help(webapp_url: &Url) -> Screen {
    let text = indoc!(
        r"
        ❓ *Помощь по игре Gladiator Arena*

        ⚔️ *Основные команды:*
        /start \- Начать игру
        /stats \- Ваша статистика
        /leaderboard \- Рейтинг игроков
        /daily \- Ежедневная награда
        /help \- Эта справка

        🎮 *Как играть:*
        1\. *Начните с покупки гладиатора*
        2\. *Участвуйте в боях на арене*
        3\. *Зарабатывайте золото и опыт*
        4\. *Улучшайте экипировку*
        5\. *Покупайте новых гладиаторов*
        6\. *Улучшайте здания школы*

        💡 *Советы:*
        • Начинайте с легких боев
        • Следите за здоровьем гладиаторов
        • Ежедневно заходите за наградой
        • Улучшайте казармы для большего количества гладиаторов

        🆘 *Поддержка:*
        Если у вас есть вопросы или проблемы, свяжитесь с разработчиком\."
    );
    Screen::new(text, keyboards::help(webapp_url))
}

pub fn developer(webapp_url: &Url) -> Screen {
    let text = indoc!(
        r"
        👨‍💻 *Разработчик игры*

        *Gladiator Arena* разработана с ❤️ для сообщества Telegram\.

        🌐 *Ссылки:*
        • [GitHub](https://github.com/yourusername)
        • [Telegram канал](https://t.me/yourchannel)
        • [Страница с обновлениями](https://t.me/yourupdates)

        💬 *Обратная связь:*
        Если у вас есть предложения или вы нашли ошибку, пожалуйста, напишите в чат поддержки\.

        ⚡ *Технологии:*
        • Backend: Node\.js \+ Express \+ PostgreSQL
        • Frontend: HTML/CSS/JS \+ Telegram Web App
        • Bot: Rust \+ teloxide
        • Hosting: Render\.com"
    );
    Screen::new(text, keyboards::developer(webapp_url)).without_link_preview()
}

pub fn daily_reward(webapp_url: &Url) -> Screen {
    let text = "🎁 *Ежедневная награда ждет вас\\!*\n\nЗаходите в игру каждый день, чтобы получать бонусы\\!";
    Screen::new(text, keyboards::daily_reward(webapp_url))
}

fn number(value: i64) -> String {
    escape(&value.to_string())
}

/// Renders the API's `last_login` timestamp as `DD.MM.YYYY HH:MM UTC`.
///
/// Accepts RFC 3339 and the bare `YYYY-MM-DD HH:MM:SS` form; anything else
/// is shown as received.
pub fn format_last_login(raw: &str) -> String {
    const DISPLAY: &str = "%d.%m.%Y %H:%M UTC";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.and_utc().format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}
