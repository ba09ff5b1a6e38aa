//! Typed view over a callback query payload.

use serde_json::{Value, json};

use crate::client::{Bot, merge_params};
use crate::error::{ApiError, ApiResult};
use crate::model::RawCallbackQuery;
use crate::registry::register_entity;

use super::message::MessageContext;
use super::user::UserContext;

/// An inline keyboard button press awaiting acknowledgement.
#[derive(Clone)]
pub struct CallbackQueryContext {
    bot: Bot,
    raw: RawCallbackQuery,
}

impl CallbackQueryContext {
    /// Wraps a raw callback query.
    pub fn new(bot: Bot, raw: RawCallbackQuery) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawCallbackQuery {
        &self.raw
    }

    /// Unique query identifier.
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    /// Opaque data attached to the pressed button, after any
    /// middleware-side short-id resolution.
    pub fn data(&self) -> Option<&str> {
        self.raw.data.as_deref()
    }

    /// The pressing user.
    pub fn from(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    /// The message the button was attached to, when still available.
    pub fn message(&self) -> Option<MessageContext> {
        self.raw
            .message
            .clone()
            .map(|msg| MessageContext::new(self.bot.clone(), *msg))
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Acknowledges the query with no user-visible feedback.
    pub async fn answer(&self) -> ApiResult<()> {
        self.bot.answer_callback_query(&self.raw.id).await
    }

    /// Acknowledges with caller-controlled parameters (`text`,
    /// `show_alert`, ...); caller keys override the derived query id.
    pub async fn answer_with(&self, params: Value) -> ApiResult<()> {
        let defaults = json!({ "callback_query_id": self.raw.id });
        self.bot
            .call("answerCallbackQuery", merge_params(defaults, params))
            .await?;
        Ok(())
    }

    /// Acknowledges with a popup alert.
    pub async fn alert(&self, text: &str) -> ApiResult<()> {
        self.answer_with(json!({ "text": text, "show_alert": true }))
            .await
    }

    /// Edits the text of the message the button belongs to.
    ///
    /// Targets the attached message when present, otherwise the inline
    /// message id; with neither, there is nothing to edit.
    pub async fn edit_text(&self, text: &str) -> ApiResult<()> {
        let params = if let Some(message) = &self.raw.message {
            json!({
                "chat_id": message.chat.id,
                "message_id": message.message_id,
                "text": text,
            })
        } else if let Some(inline_id) = &self.raw.inline_message_id {
            json!({ "inline_message_id": inline_id, "text": text })
        } else {
            return Err(ApiError::MissingTarget("editMessageText"));
        };
        self.bot.call("editMessageText", params).await?;
        Ok(())
    }
}

register_entity!("callback_query", RawCallbackQuery, CallbackQueryContext);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Transport;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct RecordingTransport {
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
            self.calls.lock().push((method.to_string(), params));
            Ok(Value::Bool(true))
        }
    }

    fn query(extra: Value) -> (CallbackQueryContext, Arc<RecordingTransport>) {
        let mut base = json!({
            "id": "cq1",
            "from": {"id": 9, "first_name": "Eva"}
        });
        if let (Value::Object(base_map), Value::Object(extra_map)) = (&mut base, extra) {
            base_map.extend(extra_map);
        }
        let transport = Arc::new(RecordingTransport {
            calls: Mutex::new(Vec::new()),
        });
        let ctx = CallbackQueryContext::new(
            Bot::new(transport.clone()),
            serde_json::from_value(base).unwrap(),
        );
        (ctx, transport)
    }

    #[tokio::test]
    async fn edit_without_target_fails() {
        let (ctx, _) = query(json!({}));
        let err = ctx.edit_text("x").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingTarget(_)));
    }

    #[tokio::test]
    async fn alert_overrides_nothing_but_adds_text() {
        let (ctx, transport) = query(json!({}));
        ctx.alert("careful").await.unwrap();
        let calls = transport.calls.lock();
        assert_eq!(calls[0].0, "answerCallbackQuery");
        assert_eq!(calls[0].1["callback_query_id"], "cq1");
        assert_eq!(calls[0].1["show_alert"], true);
    }
}
