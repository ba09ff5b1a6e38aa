//! Typed view over a user payload.

use serde_json::json;

use crate::client::{Bot, merge_params};
use crate::error::ApiResult;
use crate::model::RawUser;
use crate::registry::register_entity;

use super::message::MessageContext;

/// A user or bot account, with direct-message actions.
#[derive(Clone)]
pub struct UserContext {
    bot: Bot,
    raw: RawUser,
}

impl UserContext {
    /// Wraps a raw user.
    pub fn new(bot: Bot, raw: RawUser) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawUser {
        &self.raw
    }

    /// Unique user identifier.
    pub fn id(&self) -> i64 {
        self.raw.id
    }

    /// First name.
    pub fn firstname(&self) -> &str {
        &self.raw.first_name
    }

    /// Last name, when set.
    pub fn lastname(&self) -> Option<&str> {
        self.raw.last_name.as_deref()
    }

    /// Username without the leading `@`, when set.
    pub fn username(&self) -> Option<&str> {
        self.raw.username.as_deref()
    }

    /// First and last name joined with a space.
    pub fn full_name(&self) -> String {
        match &self.raw.last_name {
            Some(last) => format!("{} {}", self.raw.first_name, last),
            None => self.raw.first_name.clone(),
        }
    }

    /// Whether this account is a bot.
    pub fn is_bot(&self) -> bool {
        self.raw.is_bot
    }

    /// IETF language tag of the user's client, when known.
    pub fn language_code(&self) -> Option<&str> {
        self.raw.language_code.as_deref()
    }

    /// An HTML link mentioning this user by name.
    pub fn mention_html(&self) -> String {
        format!(
            "<a href=\"tg://user?id={}\">{}</a>",
            self.raw.id,
            self.full_name()
        )
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Sends a direct message to this user.
    pub async fn send(&self, text: &str) -> ApiResult<MessageContext> {
        self.send_with(json!({ "text": text })).await
    }

    /// Sends a direct message with caller-controlled parameters; caller
    /// keys override the derived `chat_id`.
    pub async fn send_with(&self, params: serde_json::Value) -> ApiResult<MessageContext> {
        let defaults = json!({ "chat_id": self.raw.id });
        let raw = self
            .bot
            .send_message_params(merge_params(defaults, params))
            .await?;
        Ok(MessageContext::new(self.bot.clone(), raw))
    }
}

register_entity!("user", RawUser, UserContext);
