//! Delivery of rendered screens with MarkdownV2 fallbacks

use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, MessageId, ParseMode};
use teloxide::utils::markdown::escape;
use teloxide::{ApiError, RequestError};

use crate::telegram::menu::Screen;
use crate::telegram::Bot;

fn is_markdown_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

fn link_preview(screen: &Screen) -> Option<LinkPreviewOptions> {
    screen.disable_link_preview.then_some(LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    })
}

/// Send a screen as a new MarkdownV2 message, auto-escaping on parse errors.
pub async fn send_screen(bot: &Bot, chat_id: ChatId, screen: &Screen) -> ResponseResult<Message> {
    let send = |text: String| {
        let mut req = bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(screen.keyboard.clone());
        if let Some(options) = link_preview(screen) {
            req = req.link_preview_options(options);
        }
        req
    };

    match send(screen.text.clone()).await {
        Ok(msg) => Ok(msg),
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("MarkdownV2 rejected for chat {}, resending escaped: {}", chat_id, e);
            send(escape(&screen.text)).await
        }
        Err(e) => Err(e),
    }
}

/// Replace the text and keyboard of an existing message.
///
/// Telegram rejects edits that change nothing; that case counts as success
/// (a user pressing the same button twice).
pub async fn edit_screen(bot: &Bot, chat_id: ChatId, message_id: MessageId, screen: &Screen) -> ResponseResult<()> {
    let edit = |text: String| {
        let mut req = bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(screen.keyboard.clone());
        if let Some(options) = link_preview(screen) {
            req = req.link_preview_options(options);
        }
        req
    };

    let result = match edit(screen.text.clone()).await {
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("MarkdownV2 rejected for chat {}, re-editing escaped: {}", chat_id, e);
            edit(escape(&screen.text)).await
        }
        other => other,
    };

    match result {
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e),
    }
}
