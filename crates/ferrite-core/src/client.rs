//! The bot client handle and its transport boundary.
//!
//! [`Transport`] is the single seam to the outside world: one async
//! function from `(method, params)` to raw JSON. Everything above it —
//! the typed method grid on [`Bot`], context action methods, the polling
//! source — funnels through [`Bot::call`].
//!
//! `Bot` is a cheap clonable handle (`Arc` inside); contexts hold one as
//! a back-reference to the owning session.
//!
//! # Parameter merging
//!
//! Context action methods assemble their parameters from the context's
//! own identity fields merged with caller-supplied overrides via
//! [`merge_params`]. Caller keys always win; the context only fills in
//! what the caller omitted.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ApiResult;
use crate::model::{RawMessage, RawPoll, RawUser};

// =============================================================================
// Transport
// =============================================================================

/// The raw HTTP transport to the remote bot API.
///
/// Implementations must distinguish a failed call (`Err`) from a call
/// that succeeded with no data (`Ok(Value::Null)`) — absence of a result
/// is valid for some methods.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invokes a remote method with the given JSON parameters.
    async fn call(&self, method: &str, params: Value) -> ApiResult<Value>;
}

// =============================================================================
// Bot
// =============================================================================

/// Handle to one bot session.
///
/// Cloning is cheap; all clones share the same transport.
#[derive(Clone)]
pub struct Bot {
    transport: Arc<dyn Transport>,
}

impl Bot {
    /// Creates a bot handle over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Invokes a remote method by name.
    ///
    /// This is the untyped escape hatch; prefer the typed methods below
    /// or the context action methods built on top of them.
    pub async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
        debug!(method = %method, "calling bot API");
        self.transport.call(method, params).await
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot").finish_non_exhaustive()
    }
}

// =============================================================================
// Parameter merging
// =============================================================================

/// Merges caller-supplied `overrides` into context-derived `defaults`.
///
/// Both values are expected to be JSON objects. Keys present in
/// `overrides` always replace the default; a non-object override
/// replaces the defaults wholesale.
pub fn merge_params(defaults: Value, overrides: Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(mut base), Value::Object(over)) => {
            for (key, value) in over {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (base, Value::Null) => base,
        (_, over) => over,
    }
}

// =============================================================================
// Typed API methods
// =============================================================================

macro_rules! impl_api {
    // No decoded return value.
    ($(#[$meta:meta])* $name:ident => $method:literal, ($($arg:ident: $typ:ty),* $(,)?)) => {
        $(#[$meta])*
        pub async fn $name(&self, $($arg: $typ),*) -> ApiResult<()> {
            self.call($method, json!({ $(stringify!($arg): $arg),* })).await?;
            Ok(())
        }
    };
    // Returns a type decoded from the result.
    ($(#[$meta:meta])* $name:ident => $method:literal, ($($arg:ident: $typ:ty),* $(,)?) -> $ret:ty) => {
        $(#[$meta])*
        pub async fn $name(&self, $($arg: $typ),*) -> ApiResult<$ret> {
            let result = self.call($method, json!({ $(stringify!($arg): $arg),* })).await?;
            Ok(serde_json::from_value::<$ret>(result)?)
        }
    };
}

impl Bot {
    impl_api!(
        /// Returns the bot's own user record.
        get_me => "getMe", () -> RawUser
    );

    impl_api!(
        /// Sends a plain text message to a chat.
        send_message => "sendMessage", (chat_id: i64, text: &str) -> RawMessage
    );

    impl_api!(
        /// Deletes a message.
        delete_message => "deleteMessage", (chat_id: i64, message_id: i64)
    );

    impl_api!(
        /// Pins a message in a chat.
        pin_chat_message => "pinChatMessage", (chat_id: i64, message_id: i64)
    );

    impl_api!(
        /// Unpins a message in a chat.
        unpin_chat_message => "unpinChatMessage", (chat_id: i64, message_id: i64)
    );

    impl_api!(
        /// Acknowledges a callback query without user-visible feedback.
        answer_callback_query => "answerCallbackQuery", (callback_query_id: &str)
    );

    impl_api!(
        /// Approves a pending chat join request.
        approve_chat_join_request => "approveChatJoinRequest", (chat_id: i64, user_id: i64)
    );

    impl_api!(
        /// Declines a pending chat join request.
        decline_chat_join_request => "declineChatJoinRequest", (chat_id: i64, user_id: i64)
    );

    impl_api!(
        /// Bans a member from a chat.
        ban_chat_member => "banChatMember", (chat_id: i64, user_id: i64)
    );

    impl_api!(
        /// Lifts a ban from a chat member.
        unban_chat_member => "unbanChatMember", (chat_id: i64, user_id: i64)
    );

    impl_api!(
        /// Answers a pre-checkout query.
        ///
        /// `ok: false` must be accompanied by an `error_message` through
        /// the context-level `reject` helper.
        answer_pre_checkout_query => "answerPreCheckoutQuery", (pre_checkout_query_id: &str, ok: bool)
    );

    impl_api!(
        /// Answers a shipping query.
        answer_shipping_query => "answerShippingQuery", (shipping_query_id: &str, ok: bool)
    );

    impl_api!(
        /// Stops a poll and returns its final state.
        stop_poll => "stopPoll", (chat_id: i64, message_id: i64) -> RawPoll
    );

    impl_api!(
        /// Broadcasts a chat action ("typing", "upload_photo", ...).
        send_chat_action => "sendChatAction", (chat_id: i64, action: &str)
    );

    /// Long-polls the platform for the next batch of raw update envelopes.
    ///
    /// Returns raw JSON values so the caller can track `update_id` even
    /// for envelopes the dispatcher later drops as unclassifiable.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: u64,
        limit: u8,
        allowed_updates: &[String],
    ) -> ApiResult<Vec<Value>> {
        let mut params = json!({
            "timeout": timeout,
            "limit": limit,
        });
        if let Some(offset) = offset {
            params["offset"] = json!(offset);
        }
        if !allowed_updates.is_empty() {
            params["allowed_updates"] = json!(allowed_updates);
        }
        let result = self.call("getUpdates", params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Sends a message assembled from context defaults plus caller
    /// overrides, returning the sent message's raw record.
    ///
    /// Used by context action methods; `params` must already contain
    /// every required field (`chat_id`, `text`, ...).
    pub async fn send_message_params(&self, params: Value) -> ApiResult<RawMessage> {
        let result = self.call("sendMessage", params).await?;
        Ok(serde_json::from_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    pub(crate) struct RecordingTransport {
        pub calls: Mutex<Vec<(String, Value)>>,
        pub response: Value,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
            self.calls.lock().push((method.to_string(), params));
            Ok(self.response.clone())
        }
    }

    fn bot_with(response: Value) -> (Bot, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport {
            calls: Mutex::new(Vec::new()),
            response,
        });
        (Bot::new(transport.clone()), transport)
    }

    #[test]
    fn merge_params_caller_wins() {
        let merged = merge_params(
            json!({"chat_id": 1, "text": "default"}),
            json!({"text": "override", "parse_mode": "HTML"}),
        );
        assert_eq!(merged["chat_id"], 1);
        assert_eq!(merged["text"], "override");
        assert_eq!(merged["parse_mode"], "HTML");
    }

    #[test]
    fn merge_params_null_override_keeps_defaults() {
        let merged = merge_params(json!({"chat_id": 1}), Value::Null);
        assert_eq!(merged["chat_id"], 1);
    }

    #[tokio::test]
    async fn typed_method_builds_params() {
        let (bot, transport) = bot_with(json!(null));
        bot.delete_message(42, 7).await.unwrap();
        let calls = transport.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "deleteMessage");
        assert_eq!(calls[0].1, json!({"chat_id": 42, "message_id": 7}));
    }

    #[tokio::test]
    async fn get_updates_omits_absent_offset() {
        let (bot, transport) = bot_with(json!([]));
        bot.get_updates(None, 30, 100, &[]).await.unwrap();
        let calls = transport.calls.lock();
        assert!(calls[0].1.get("offset").is_none());
        assert!(calls[0].1.get("allowed_updates").is_none());
    }
}
