//! Common test utilities
//!
//! Every test gets two mock servers: one standing in for the Telegram Bot
//! API and one for the game backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use serde_json::{json, Value};
use teloxide::dptree;
use teloxide::types::{CallbackQuery, Me, Message, Update, UserId};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arena_bot::core::Config;
use arena_bot::game_api::GameApiClient;
use arena_bot::telegram::{schema, Bot, HandlerDeps, HandlerError, MenuUser};

pub const TEST_CHAT_ID: i64 = 123456789;
pub const TEST_USER_ID: u64 = 123456789;
pub const WEBAPP_URL: &str = "https://arena.example.com/app";

/// Bot wired to mock servers
pub struct TestHarness {
    pub telegram: MockServer,
    pub game_api: MockServer,
    pub bot: Bot,
    pub deps: HandlerDeps,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Harness with extra configuration variables on top of the test defaults
    pub async fn with_env(extra: &[(&str, &str)]) -> Self {
        let telegram = MockServer::start().await;
        let game_api = MockServer::start().await;

        let mut vars: HashMap<String, String> = HashMap::from([
            ("BOT_TOKEN".to_string(), "test_token_12345:ABCDEF".to_string()),
            ("API_URL".to_string(), format!("{}/api", game_api.uri())),
            ("WEBAPP_URL".to_string(), WEBAPP_URL.to_string()),
            ("API_TIMEOUT_SECS".to_string(), "2".to_string()),
        ]);
        for (key, value) in extra {
            vars.insert((*key).to_string(), (*value).to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config should be valid");
        let game_client =
            GameApiClient::new(config.api_url.clone(), config.api_timeout).expect("Failed to build game API client");

        let bot = teloxide::Bot::new("test_token_12345:ABCDEF").set_api_url(telegram.uri().parse().unwrap());
        let deps = HandlerDeps::new(Arc::new(config), game_client);

        Self {
            telegram,
            game_api,
            bot,
            deps,
        }
    }

    pub fn requester(&self) -> MenuUser {
        MenuUser::new(UserId(TEST_USER_ID), "Test")
    }

    /// Mock the Telegram methods the bot uses
    pub async fn mock_all_telegram_api(&self) {
        let message = json!({
            "ok": true,
            "result": {
                "message_id": 42,
                "from": { "id": 987654321, "is_bot": true, "first_name": "TestBot" },
                "chat": { "id": TEST_CHAT_ID, "type": "private" },
                "date": 1735992000,
                "text": "Response"
            }
        });
        let ok_true = json!({ "ok": true, "result": true });

        // Telegram method names are case-insensitive, match them that way
        for name in ["sendmessage", "editmessagetext"] {
            Mock::given(method("POST"))
                .and(path_regex(format!("(?i)/bot[^/]+/{}$", name)))
                .respond_with(ResponseTemplate::new(200).set_body_json(message.clone()))
                .mount(&self.telegram)
                .await;
        }
        for name in ["answercallbackquery", "setmycommands"] {
            Mock::given(method("POST"))
                .and(path_regex(format!("(?i)/bot[^/]+/{}$", name)))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_true.clone()))
                .mount(&self.telegram)
                .await;
        }
    }

    /// Answer the next sendMessage with a MarkdownV2 parse failure
    pub async fn mock_markdown_rejection_once(&self) {
        let error = json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities: Character '!' is reserved and must be escaped"
        });
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendmessage$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&self.telegram)
            .await;
    }

    pub async fn mock_player(&self, user_id: u64, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/player/{}", user_id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.game_api)
            .await;
    }

    pub async fn mock_player_raw(&self, user_id: u64, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/player/{}", user_id)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.game_api)
            .await;
    }

    pub async fn mock_leaderboard(&self, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/leaderboard"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.game_api)
            .await;
    }

    pub async fn mock_leaderboard_raw(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/api/leaderboard"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.game_api)
            .await;
    }

    /// Runs one update through the production handler tree
    pub async fn dispatch_update(&self, update: Update) -> ControlFlow<Result<(), HandlerError>> {
        let handler = schema(self.deps.clone());
        match handler.dispatch(dptree::deps![self.bot.clone(), update, bot_me()]).await {
            ControlFlow::Break(result) => ControlFlow::Break(result),
            ControlFlow::Continue(_) => ControlFlow::Continue(()),
        }
    }

    /// Lowercased Telegram method names in the order they were called
    pub async fn telegram_methods(&self) -> Vec<String> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| r.url.path().rsplit('/').next().map(str::to_lowercase))
            .collect()
    }

    /// JSON bodies of every request sent to the given Telegram method
    pub async fn telegram_calls(&self, method_name: &str) -> Vec<Value> {
        let suffix = format!("/{}", method_name.to_lowercase());
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().to_lowercase().ends_with(&suffix))
            .map(|r| serde_json::from_slice(&r.body).expect("Body should be valid JSON"))
            .collect()
    }

    pub async fn sent_messages(&self) -> Vec<Value> {
        self.telegram_calls("sendMessage").await
    }

    pub async fn game_api_requests(&self) -> usize {
        self.game_api.received_requests().await.unwrap_or_default().len()
    }
}

/// Create a Message from JSON (more reliable than struct construction)
pub fn message_from_json(text: &str, chat_id: i64, user_id: u64) -> Message {
    let json = json!({
        "message_id": 1,
        "date": 1735992000,
        "chat": {
            "id": chat_id,
            "type": "private",
            "first_name": "Test",
            "username": "testuser"
        },
        "from": {
            "id": user_id,
            "is_bot": false,
            "first_name": "Test",
            "username": "testuser",
            "language_code": "ru"
        },
        "text": text
    });

    serde_json::from_value(json).expect("Failed to deserialize message")
}

/// Create a CallbackQuery pressed on message 42
pub fn callback_from_json(data: &str, chat_id: i64, user_id: u64) -> CallbackQuery {
    serde_json::from_value(callback_json(data, chat_id, user_id)).expect("Failed to deserialize callback")
}

/// Raw callback query payload pressed on message 42
pub fn callback_json(data: &str, chat_id: i64, user_id: u64) -> Value {
    json!({
        "id": "callback_123",
        "from": {
            "id": user_id,
            "is_bot": false,
            "first_name": "Test",
            "username": "testuser",
            "language_code": "ru"
        },
        "message": {
            "message_id": 42,
            "date": 1735992000,
            "chat": {
                "id": chat_id,
                "type": "private",
                "first_name": "Test",
                "username": "testuser"
            },
            "from": {
                "id": 987654321,
                "is_bot": true,
                "first_name": "TestBot",
                "username": "test_bot"
            },
            "text": "Original message"
        },
        "chat_instance": "chat_instance_123",
        "data": data
    })
}

/// Bot identity used by command parsing
pub fn bot_me() -> Me {
    let json = json!({
        "id": 987654321,
        "is_bot": true,
        "first_name": "TestBot",
        "username": "arena_test_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false,
        "has_topics_enabled": false,
        "allows_users_to_create_topics": false
    });

    serde_json::from_value(json).expect("Failed to deserialize bot identity")
}

/// Wrap a message payload into an Update
pub fn message_update(message: Value) -> Update {
    serde_json::from_str(&json!({ "update_id": 1, "message": message }).to_string()).expect("Failed to deserialize update")
}

/// Wrap a callback query payload into an Update
pub fn callback_update(callback: Value) -> Update {
    serde_json::from_str(&json!({ "update_id": 2, "callback_query": callback }).to_string()).expect("Failed to deserialize update")
}

/// Text message from a user in a private chat, as raw JSON
pub fn private_text(text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 1735992000,
        "chat": { "id": TEST_CHAT_ID, "type": "private", "first_name": "Test" },
        "from": { "id": TEST_USER_ID, "is_bot": false, "first_name": "Test" },
        "text": text
    })
}

/// Player snapshot as the game backend returns it
pub fn player_snapshot(game_data: Value) -> Value {
    json!({
        "first_name": "Maximus",
        "level": 5,
        "experience": 1200,
        "gold": 350,
        "gems": 12,
        "fame": 640,
        "energy": 80,
        "max_energy": 100,
        "last_login": "2026-10-18T09:30:00Z",
        "game_data": game_data
    })
}

/// Flattened button list of an inline keyboard in a request body
pub fn buttons(body: &Value) -> Vec<Value> {
    body["reply_markup"]["inline_keyboard"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.as_array())
                .flatten()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
