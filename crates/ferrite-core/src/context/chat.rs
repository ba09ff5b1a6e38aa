//! Typed view over a chat payload.

use serde_json::{Value, json};

use crate::client::{Bot, merge_params};
use crate::error::ApiResult;
use crate::model::{ChatType, RawChat};
use crate::registry::register_entity;

use super::message::MessageContext;

/// A chat of any kind, with chat-level actions.
#[derive(Clone)]
pub struct ChatContext {
    bot: Bot,
    raw: RawChat,
}

impl ChatContext {
    /// Wraps a raw chat.
    pub fn new(bot: Bot, raw: RawChat) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawChat {
        &self.raw
    }

    /// Unique chat identifier.
    pub fn id(&self) -> i64 {
        self.raw.id
    }

    /// Chat kind discriminant.
    pub fn chat_type(&self) -> ChatType {
        self.raw.kind
    }

    /// Whether this is a one-to-one chat.
    pub fn is_private(&self) -> bool {
        self.raw.kind == ChatType::Private
    }

    /// Title, for groups, supergroups and channels.
    pub fn title(&self) -> Option<&str> {
        self.raw.title.as_deref()
    }

    /// Username, when the chat has one.
    pub fn username(&self) -> Option<&str> {
        self.raw.username.as_deref()
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Sends a text message to this chat.
    pub async fn send(&self, text: &str) -> ApiResult<MessageContext> {
        self.send_with(json!({ "text": text })).await
    }

    /// Sends a message with caller-controlled parameters; caller keys
    /// override the derived `chat_id`.
    pub async fn send_with(&self, params: Value) -> ApiResult<MessageContext> {
        let defaults = json!({ "chat_id": self.raw.id });
        let raw = self
            .bot
            .send_message_params(merge_params(defaults, params))
            .await?;
        Ok(MessageContext::new(self.bot.clone(), raw))
    }

    /// Broadcasts a chat action ("typing", ...).
    pub async fn send_action(&self, action: &str) -> ApiResult<()> {
        self.bot.send_chat_action(self.raw.id, action).await
    }

    /// Pins a message in this chat.
    pub async fn pin_message(&self, message_id: i64) -> ApiResult<()> {
        self.bot.pin_chat_message(self.raw.id, message_id).await
    }

    /// Deletes a message from this chat.
    pub async fn delete_message(&self, message_id: i64) -> ApiResult<()> {
        self.bot.delete_message(self.raw.id, message_id).await
    }

    /// Bans a member.
    pub async fn ban_member(&self, user_id: i64) -> ApiResult<()> {
        self.bot.ban_chat_member(self.raw.id, user_id).await
    }

    /// Lifts a member's ban.
    pub async fn unban_member(&self, user_id: i64) -> ApiResult<()> {
        self.bot.unban_chat_member(self.raw.id, user_id).await
    }

    /// Renames the chat.
    pub async fn set_title(&self, title: &str) -> ApiResult<()> {
        self.bot
            .call("setChatTitle", json!({ "chat_id": self.raw.id, "title": title }))
            .await?;
        Ok(())
    }

    /// Leaves the chat.
    pub async fn leave(&self) -> ApiResult<()> {
        self.bot
            .call("leaveChat", json!({ "chat_id": self.raw.id }))
            .await?;
        Ok(())
    }
}

register_entity!("chat", RawChat, ChatContext);
