//! Typed view over a chat join request.

use crate::client::Bot;
use crate::error::ApiResult;
use crate::model::RawChatJoinRequest;
use crate::registry::register_entity;

use super::chat::ChatContext;
use super::user::UserContext;

/// A pending request to join a chat, with approve/decline actions.
#[derive(Clone)]
pub struct ChatJoinRequestContext {
    bot: Bot,
    raw: RawChatJoinRequest,
}

impl ChatJoinRequestContext {
    /// Wraps a raw join request.
    pub fn new(bot: Bot, raw: RawChatJoinRequest) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawChatJoinRequest {
        &self.raw
    }

    /// The chat being joined.
    pub fn chat(&self) -> ChatContext {
        ChatContext::new(self.bot.clone(), self.raw.chat.clone())
    }

    /// The requesting user.
    pub fn from(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    /// Bio of the requesting user, when set.
    pub fn bio(&self) -> Option<&str> {
        self.raw.bio.as_deref()
    }

    /// Unix time of the request.
    pub fn date(&self) -> i64 {
        self.raw.date
    }

    /// Private-chat id usable to contact the requester until the
    /// request is processed.
    pub fn user_chat_id(&self) -> Option<i64> {
        self.raw.user_chat_id
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Approves the request.
    pub async fn approve(&self) -> ApiResult<()> {
        self.bot
            .approve_chat_join_request(self.raw.chat.id, self.raw.from.id)
            .await
    }

    /// Declines the request.
    pub async fn decline(&self) -> ApiResult<()> {
        self.bot
            .decline_chat_join_request(self.raw.chat.id, self.raw.from.id)
            .await
    }
}

register_entity!("chat_join_request", RawChatJoinRequest, ChatJoinRequestContext);
