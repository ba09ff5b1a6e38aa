//! Typed view over a message payload.
//!
//! This is the busiest context: it exposes the sender and chat as
//! nested contexts, renders formatting entities back to markup, groups
//! the mutually-exclusive service-message fields into a sum type, and
//! carries the reply/send/pin/delete action surface.

use serde_json::{Value, json};

use crate::client::{Bot, merge_params};
use crate::error::ApiResult;
use crate::format;
use crate::model::{RawMessage, RawUser};
use crate::registry::register_entity;

use super::chat::ChatContext;
use super::location::LocationContext;
use super::poll::PollContext;
use super::user::UserContext;

// =============================================================================
// ServiceEvent
// =============================================================================

/// The service-message content of a message, reduced to one variant.
///
/// The wire contract says at most one of the underlying fields is
/// populated per message; [`MessageContext::service_event`] probes them
/// in a fixed order and never assumes which one it finds.
#[derive(Debug)]
pub enum ServiceEvent {
    /// Members were added to the chat.
    NewMembers(Vec<RawUser>),
    /// A member was removed.
    MemberLeft(RawUser),
    /// The chat was renamed.
    TitleChanged(String),
    /// The chat photo changed.
    PhotoChanged,
    /// The chat photo was deleted.
    PhotoDeleted,
    /// The group was just created.
    GroupCreated,
    /// A message was pinned.
    Pinned(Box<RawMessage>),
    /// The group migrated to a supergroup with this id.
    MigratedTo(i64),
    /// The supergroup migrated from a group with this id.
    MigratedFrom(i64),
}

// =============================================================================
// MessageContext
// =============================================================================

/// A message in a chat.
#[derive(Clone)]
pub struct MessageContext {
    bot: Bot,
    raw: RawMessage,
}

impl MessageContext {
    /// Wraps a raw message.
    pub fn new(bot: Bot, raw: RawMessage) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawMessage {
        &self.raw
    }

    /// Message identifier within its chat.
    pub fn id(&self) -> i64 {
        self.raw.message_id
    }

    /// Unix send time.
    pub fn date(&self) -> i64 {
        self.raw.date
    }

    /// Unix edit time, for edited messages.
    pub fn edit_date(&self) -> Option<i64> {
        self.raw.edit_date
    }

    /// Text content, for text messages.
    pub fn text(&self) -> Option<&str> {
        self.raw.text.as_deref()
    }

    /// Caption, for media messages.
    pub fn caption(&self) -> Option<&str> {
        self.raw.caption.as_deref()
    }

    /// Text or caption, whichever is present.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.raw.text.as_deref().or(self.raw.caption.as_deref())
    }

    /// Whether the text starts a bot command (`/...`).
    pub fn is_command(&self) -> bool {
        self.raw
            .text
            .as_deref()
            .is_some_and(|t| t.starts_with('/'))
    }

    // ─── Nested contexts ─────────────────────────────────────────────────

    /// The chat this message belongs to.
    pub fn chat(&self) -> ChatContext {
        ChatContext::new(self.bot.clone(), self.raw.chat.clone())
    }

    /// The sender, when present (absent for channel posts and some
    /// service messages).
    pub fn from(&self) -> Option<UserContext> {
        self.raw
            .from
            .clone()
            .map(|user| UserContext::new(self.bot.clone(), user))
    }

    /// The message this one replies to, when present.
    pub fn reply_to(&self) -> Option<MessageContext> {
        self.raw
            .reply_to_message
            .clone()
            .map(|msg| MessageContext::new(self.bot.clone(), *msg))
    }

    /// The attached location, when present.
    pub fn location(&self) -> Option<LocationContext> {
        self.raw
            .location
            .clone()
            .map(|loc| LocationContext::new(self.bot.clone(), loc))
    }

    /// The attached poll, when present.
    pub fn poll(&self) -> Option<PollContext> {
        self.raw
            .poll
            .clone()
            .map(|poll| PollContext::new(self.bot.clone(), poll))
    }

    // ─── Derived content ─────────────────────────────────────────────────

    /// Text rendered back to HTML using the formatting entities.
    pub fn html_text(&self) -> Option<String> {
        let text = self.raw.text.as_deref()?;
        let entities = self.raw.entities.as_deref().unwrap_or_default();
        Some(format::render_html(text, entities))
    }

    /// Caption rendered back to HTML using the caption entities.
    pub fn html_caption(&self) -> Option<String> {
        let caption = self.raw.caption.as_deref()?;
        let entities = self.raw.caption_entities.as_deref().unwrap_or_default();
        Some(format::render_html(caption, entities))
    }

    /// The service-message content, when this message carries one.
    pub fn service_event(&self) -> Option<ServiceEvent> {
        let service = &self.raw.service;
        if let Some(members) = &service.new_chat_members {
            Some(ServiceEvent::NewMembers(members.clone()))
        } else if let Some(member) = &service.left_chat_member {
            Some(ServiceEvent::MemberLeft(member.clone()))
        } else if let Some(title) = &service.new_chat_title {
            Some(ServiceEvent::TitleChanged(title.clone()))
        } else if service.new_chat_photo.is_some() {
            Some(ServiceEvent::PhotoChanged)
        } else if service.delete_chat_photo == Some(true) {
            Some(ServiceEvent::PhotoDeleted)
        } else if service.group_chat_created == Some(true) {
            Some(ServiceEvent::GroupCreated)
        } else if let Some(pinned) = &service.pinned_message {
            Some(ServiceEvent::Pinned(pinned.clone()))
        } else if let Some(id) = service.migrate_to_chat_id {
            Some(ServiceEvent::MigratedTo(id))
        } else {
            service.migrate_from_chat_id.map(ServiceEvent::MigratedFrom)
        }
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Replies to this message with plain text.
    pub async fn reply(&self, text: &str) -> ApiResult<MessageContext> {
        self.reply_with(json!({ "text": text })).await
    }

    /// Replies with caller-controlled parameters; caller keys override
    /// the derived `chat_id` and `reply_to_message_id`.
    pub async fn reply_with(&self, params: Value) -> ApiResult<MessageContext> {
        let defaults = json!({
            "chat_id": self.raw.chat.id,
            "reply_to_message_id": self.raw.message_id,
        });
        let raw = self
            .bot
            .send_message_params(merge_params(defaults, params))
            .await?;
        Ok(MessageContext::new(self.bot.clone(), raw))
    }

    /// Sends a text message into the same chat, without replying.
    pub async fn answer(&self, text: &str) -> ApiResult<MessageContext> {
        let raw = self
            .bot
            .send_message_params(json!({
                "chat_id": self.raw.chat.id,
                "text": text,
            }))
            .await?;
        Ok(MessageContext::new(self.bot.clone(), raw))
    }

    /// Edits this message's text.
    pub async fn edit_text(&self, text: &str) -> ApiResult<()> {
        self.bot
            .call(
                "editMessageText",
                json!({
                    "chat_id": self.raw.chat.id,
                    "message_id": self.raw.message_id,
                    "text": text,
                }),
            )
            .await?;
        Ok(())
    }

    /// Deletes this message.
    pub async fn delete(&self) -> ApiResult<()> {
        self.bot
            .delete_message(self.raw.chat.id, self.raw.message_id)
            .await
    }

    /// Pins this message in its chat.
    pub async fn pin(&self) -> ApiResult<()> {
        self.bot
            .pin_chat_message(self.raw.chat.id, self.raw.message_id)
            .await
    }

    /// Forwards this message to another chat.
    pub async fn forward_to(&self, chat_id: i64) -> ApiResult<MessageContext> {
        let result = self
            .bot
            .call(
                "forwardMessage",
                json!({
                    "chat_id": chat_id,
                    "from_chat_id": self.raw.chat.id,
                    "message_id": self.raw.message_id,
                }),
            )
            .await?;
        let raw = serde_json::from_value(result)?;
        Ok(MessageContext::new(self.bot.clone(), raw))
    }

    /// The bot handle this context was built with.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

register_entity!("message", RawMessage, MessageContext);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Transport;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct RecordingTransport {
        calls: Mutex<Vec<(String, Value)>>,
        response: Value,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
            self.calls.lock().push((method.to_string(), params));
            Ok(self.response.clone())
        }
    }

    fn sent_message() -> Value {
        json!({
            "message_id": 100,
            "date": 0,
            "chat": {"id": 42, "type": "private"}
        })
    }

    fn message(extra: Value) -> MessageContext {
        let mut base = json!({
            "message_id": 7,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private"},
            "from": {"id": 9, "first_name": "Eva"}
        });
        if let (Value::Object(base_map), Value::Object(extra_map)) = (&mut base, extra) {
            base_map.extend(extra_map);
        }
        let transport = Arc::new(RecordingTransport {
            calls: Mutex::new(Vec::new()),
            response: sent_message(),
        });
        MessageContext::new(Bot::new(transport), serde_json::from_value(base).unwrap())
    }

    #[test]
    fn optional_accessors_do_not_panic() {
        let msg = message(json!({}));
        assert!(msg.text().is_none());
        assert!(msg.reply_to().is_none());
        assert!(msg.location().is_none());
        assert!(msg.service_event().is_none());
    }

    #[test]
    fn nested_contexts_built_only_when_present() {
        let msg = message(json!({"text": "hello"}));
        assert_eq!(msg.from().map(|u| u.id()), Some(9));
        assert_eq!(msg.chat().id(), 42);
    }

    #[test]
    fn service_event_groups_exclusive_fields() {
        let msg = message(json!({"new_chat_title": "renamed"}));
        match msg.service_event() {
            Some(ServiceEvent::TitleChanged(title)) => assert_eq!(title, "renamed"),
            other => panic!("unexpected service event: {other:?}"),
        }

        let msg = message(json!({"migrate_to_chat_id": -100123}));
        assert!(matches!(
            msg.service_event(),
            Some(ServiceEvent::MigratedTo(-100123))
        ));
    }

    #[test]
    fn html_text_renders_entities() {
        let msg = message(json!({
            "text": "Hello bold and link",
            "entities": [
                {"type": "bold", "offset": 6, "length": 4},
                {"type": "text_link", "offset": 15, "length": 4, "url": "http://x"}
            ]
        }));
        assert_eq!(
            msg.html_text().unwrap(),
            "Hello <b>bold</b> and <a href=\"http://x\">link</a>"
        );
    }

    #[tokio::test]
    async fn reply_merges_caller_params_over_defaults() {
        let transport = Arc::new(RecordingTransport {
            calls: Mutex::new(Vec::new()),
            response: sent_message(),
        });
        let raw = serde_json::from_value(json!({
            "message_id": 7,
            "date": 0,
            "chat": {"id": 42, "type": "private"}
        }))
        .unwrap();
        let msg = MessageContext::new(Bot::new(transport.clone()), raw);

        msg.reply_with(json!({"text": "hi", "reply_to_message_id": 99}))
            .await
            .unwrap();

        let calls = transport.calls.lock();
        assert_eq!(calls[0].0, "sendMessage");
        assert_eq!(calls[0].1["chat_id"], 42);
        // Caller override wins over the context-derived default.
        assert_eq!(calls[0].1["reply_to_message_id"], 99);
    }
}
