//! Handler types and dependencies

use std::sync::Arc;

use strum::Display;
use teloxide::types::{CallbackQuery, ChatId, MaybeInaccessibleMessage, Message, MessageId, User, UserId};

use crate::core::config::Config;
use crate::game_api::GameApiClient;
use crate::telegram::bot::Command;
use crate::telegram::menu::MenuCallback;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<Config>,
    pub game_api: GameApiClient,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(config: Arc<Config>, game_api: GameApiClient) -> Self {
        Self { config, game_api }
    }
}

/// Everything a user can ask the bot for, whether by command or by button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MenuAction {
    Start,
    Stats,
    Leaderboard,
    Help,
    Developer,
    BackToMain,
    DailyReward,
}

impl From<Command> for MenuAction {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => MenuAction::Start,
            Command::Stats => MenuAction::Stats,
            Command::Leaderboard => MenuAction::Leaderboard,
            Command::Help => MenuAction::Help,
            Command::Daily => MenuAction::DailyReward,
        }
    }
}

impl From<MenuCallback> for MenuAction {
    fn from(callback: MenuCallback) -> Self {
        match callback {
            MenuCallback::Stats => MenuAction::Stats,
            MenuCallback::Leaderboard => MenuAction::Leaderboard,
            MenuCallback::Help => MenuAction::Help,
            MenuCallback::Developer => MenuAction::Developer,
            MenuCallback::BackToMain => MenuAction::BackToMain,
        }
    }
}

/// The user who triggered an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuUser {
    pub id: UserId,
    pub first_name: String,
}

impl MenuUser {
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.first_name.clone())
    }

    /// Sender of a message; `None` for channel posts and anonymous admins
    pub fn from_message(msg: &Message) -> Option<Self> {
        msg.from.as_ref().map(Self::from_user)
    }
}

/// Where the reply goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Commands get a fresh message
    NewMessage(ChatId),
    /// Button presses rewrite the message that carried the button
    Edit { chat_id: ChatId, message_id: MessageId },
}

impl ReplyTarget {
    /// Chat the command came from; the daily reward always goes to the user directly
    pub fn for_command(msg: &Message, user: &MenuUser, action: MenuAction) -> Self {
        match action {
            MenuAction::DailyReward => ReplyTarget::NewMessage(ChatId::from(user.id)),
            _ => ReplyTarget::NewMessage(msg.chat.id),
        }
    }

    /// Pressed message when it is still reachable, otherwise a new message to the user
    pub fn for_callback(q: &CallbackQuery) -> Self {
        match q.message.as_ref() {
            Some(MaybeInaccessibleMessage::Regular(message)) => ReplyTarget::Edit {
                chat_id: message.chat.id,
                message_id: message.id,
            },
            _ => ReplyTarget::NewMessage(ChatId::from(q.from.id)),
        }
    }
}
