//! The inbound update envelope and its classification.
//!
//! An [`Update`] carries exactly one populated payload field per the
//! platform's contract. [`Update::kind`] scans the mutually-exclusive
//! fields in a fixed priority order and reports the first populated one;
//! an envelope with none of the known fields populated classifies as
//! `None` and is dropped by the dispatcher.
//!
//! Unknown extra keys are tolerated on decode, so envelopes from newer
//! platform versions still classify by whichever known field they carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::callback::RawCallbackQuery;
use super::inline::RawInlineQuery;
use super::join_request::RawChatJoinRequest;
use super::member::RawChatMemberUpdated;
use super::message::RawMessage;
use super::payments::{RawPreCheckoutQuery, RawShippingQuery};
use super::poll::{RawPoll, RawPollAnswer};

/// Logical update type, determined by which envelope field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// New incoming message.
    Message,
    /// New version of a previously sent message.
    EditedMessage,
    /// New channel post.
    ChannelPost,
    /// Inline keyboard button press.
    CallbackQuery,
    /// Inline mode query.
    InlineQuery,
    /// Somebody's membership status changed.
    ChatMember,
    /// A user asked to join a chat.
    ChatJoinRequest,
    /// Pre-checkout payment confirmation.
    PreCheckoutQuery,
    /// Shipping options request.
    ShippingQuery,
    /// Poll state change.
    Poll,
    /// Vote change in a non-anonymous poll.
    PollAnswer,
}

impl UpdateKind {
    /// The envelope key this kind corresponds to.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateKind::Message => "message",
            UpdateKind::EditedMessage => "edited_message",
            UpdateKind::ChannelPost => "channel_post",
            UpdateKind::CallbackQuery => "callback_query",
            UpdateKind::InlineQuery => "inline_query",
            UpdateKind::ChatMember => "chat_member",
            UpdateKind::ChatJoinRequest => "chat_join_request",
            UpdateKind::PreCheckoutQuery => "pre_checkout_query",
            UpdateKind::ShippingQuery => "shipping_query",
            UpdateKind::Poll => "poll",
            UpdateKind::PollAnswer => "poll_answer",
        }
    }

    /// The entity registry name of the root context for this kind.
    ///
    /// Edited messages and channel posts are message-shaped, so they
    /// share the `message` context.
    pub fn entity_name(self) -> &'static str {
        match self {
            UpdateKind::Message | UpdateKind::EditedMessage | UpdateKind::ChannelPost => "message",
            UpdateKind::CallbackQuery => "callback_query",
            UpdateKind::InlineQuery => "inline_query",
            UpdateKind::ChatMember => "chat_member",
            UpdateKind::ChatJoinRequest => "chat_join_request",
            UpdateKind::PreCheckoutQuery => "pre_checkout_query",
            UpdateKind::ShippingQuery => "shipping_query",
            UpdateKind::Poll => "poll",
            UpdateKind::PollAnswer => "poll_answer",
        }
    }
}

impl std::fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound update envelope.
///
/// The platform guarantees at most one payload field is populated;
/// the dispatcher does not assume more than one and tolerates zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier.
    #[serde(default)]
    pub update_id: i64,
    /// New incoming message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<RawMessage>,
    /// New version of an edited message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<RawMessage>,
    /// New channel post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<RawMessage>,
    /// Inline keyboard button press.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<RawCallbackQuery>,
    /// Inline mode query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<RawInlineQuery>,
    /// Membership status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<RawChatMemberUpdated>,
    /// Pending join request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_join_request: Option<RawChatJoinRequest>,
    /// Pre-checkout payment confirmation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_checkout_query: Option<RawPreCheckoutQuery>,
    /// Shipping options request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_query: Option<RawShippingQuery>,
    /// Poll state change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<RawPoll>,
    /// Vote change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_answer: Option<RawPollAnswer>,
}

impl Update {
    /// Classifies this envelope by the first populated field, scanning
    /// in fixed priority order. `None` means nothing recognizable is
    /// populated and the update should be dropped.
    pub fn kind(&self) -> Option<UpdateKind> {
        if self.message.is_some() {
            Some(UpdateKind::Message)
        } else if self.edited_message.is_some() {
            Some(UpdateKind::EditedMessage)
        } else if self.channel_post.is_some() {
            Some(UpdateKind::ChannelPost)
        } else if self.callback_query.is_some() {
            Some(UpdateKind::CallbackQuery)
        } else if self.inline_query.is_some() {
            Some(UpdateKind::InlineQuery)
        } else if self.chat_member.is_some() {
            Some(UpdateKind::ChatMember)
        } else if self.chat_join_request.is_some() {
            Some(UpdateKind::ChatJoinRequest)
        } else if self.pre_checkout_query.is_some() {
            Some(UpdateKind::PreCheckoutQuery)
        } else if self.shipping_query.is_some() {
            Some(UpdateKind::ShippingQuery)
        } else if self.poll.is_some() {
            Some(UpdateKind::Poll)
        } else if self.poll_answer.is_some() {
            Some(UpdateKind::PollAnswer)
        } else {
            None
        }
    }

    /// Serializes the payload field matching `kind` back to a raw JSON
    /// value, as consumed by the entity registry.
    ///
    /// Returns `None` when the field for `kind` is not populated (the
    /// envelope was mutated after classification).
    pub fn payload_value(&self, kind: UpdateKind) -> Option<Value> {
        fn to_value<T: Serialize>(field: &Option<T>) -> Option<Value> {
            field
                .as_ref()
                .and_then(|payload| serde_json::to_value(payload).ok())
        }

        match kind {
            UpdateKind::Message => to_value(&self.message),
            UpdateKind::EditedMessage => to_value(&self.edited_message),
            UpdateKind::ChannelPost => to_value(&self.channel_post),
            UpdateKind::CallbackQuery => to_value(&self.callback_query),
            UpdateKind::InlineQuery => to_value(&self.inline_query),
            UpdateKind::ChatMember => to_value(&self.chat_member),
            UpdateKind::ChatJoinRequest => to_value(&self.chat_join_request),
            UpdateKind::PreCheckoutQuery => to_value(&self.pre_checkout_query),
            UpdateKind::ShippingQuery => to_value(&self.shipping_query),
            UpdateKind::Poll => to_value(&self.poll),
            UpdateKind::PollAnswer => to_value(&self.poll_answer),
        }
    }
}
