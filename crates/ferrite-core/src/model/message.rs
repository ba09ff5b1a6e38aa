//! Raw message payload, including formatting entities and the
//! service-message field group.

use serde::{Deserialize, Serialize};

use super::chat::RawChat;
use super::location::RawLocation;
use super::poll::RawPoll;
use super::user::RawUser;

/// One formatting entity over a message's text or caption.
///
/// `offset`/`length` are character positions into the entity's text.
/// The `kind` tag set is open-ended; renderers must treat unknown kinds
/// as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessageEntity {
    /// Entity kind ("bold", "italic", "text_link", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Start offset in characters.
    pub offset: usize,
    /// Length in characters.
    pub length: usize,
    /// Target URL, for `text_link` entities.
    #[serde(default)]
    pub url: Option<String>,
    /// Mentioned user, for `text_mention` entities.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Programming language, for `pre` entities.
    #[serde(default)]
    pub language: Option<String>,
}

/// The mutually-exclusive service-message fields of a message.
///
/// At most one of these is expected to be populated per message — that
/// is the wire contract, not something this struct enforces. Regular
/// content messages leave all of them empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawServiceFields {
    /// Members added to the chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_members: Option<Vec<RawUser>>,
    /// Member removed from the chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<RawUser>,
    /// New chat title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    /// Chat photo changed (payload content is irrelevant here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_photo: Option<serde_json::Value>,
    /// Chat photo deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_chat_photo: Option<bool>,
    /// The group was just created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_chat_created: Option<bool>,
    /// Message pinned in this chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<RawMessage>>,
    /// The group migrated to a supergroup with this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// The supergroup migrated from a group with this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,
}

/// A message in a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Unique message identifier within the chat.
    pub message_id: i64,
    /// Unix send time.
    #[serde(default)]
    pub date: i64,
    /// The chat the message belongs to.
    pub chat: RawChat,
    /// Sender; absent for channel posts and some service messages.
    #[serde(default)]
    pub from: Option<RawUser>,
    /// Text, for text messages.
    #[serde(default)]
    pub text: Option<String>,
    /// Caption, for media messages.
    #[serde(default)]
    pub caption: Option<String>,
    /// Formatting entities over `text`.
    #[serde(default)]
    pub entities: Option<Vec<RawMessageEntity>>,
    /// Formatting entities over `caption`.
    #[serde(default)]
    pub caption_entities: Option<Vec<RawMessageEntity>>,
    /// The message this one replies to.
    #[serde(default)]
    pub reply_to_message: Option<Box<RawMessage>>,
    /// Attached location.
    #[serde(default)]
    pub location: Option<RawLocation>,
    /// Attached native poll.
    #[serde(default)]
    pub poll: Option<RawPoll>,
    /// Unix edit time, for edited messages.
    #[serde(default)]
    pub edit_date: Option<i64>,
    /// Grouped service-message fields.
    #[serde(flatten)]
    pub service: RawServiceFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_fields_flatten_from_top_level_keys() {
        let msg: RawMessage = serde_json::from_value(json!({
            "message_id": 1,
            "date": 0,
            "chat": {"id": 9, "type": "group"},
            "new_chat_title": "renamed"
        }))
        .unwrap();
        assert_eq!(msg.service.new_chat_title.as_deref(), Some("renamed"));
        assert!(msg.service.pinned_message.is_none());
    }

    #[test]
    fn unknown_keys_ignored() {
        let msg: RawMessage = serde_json::from_value(json!({
            "message_id": 1,
            "date": 0,
            "chat": {"id": 9, "type": "private"},
            "some_future_field": {"x": 1}
        }))
        .unwrap();
        assert!(msg.text.is_none());
    }
}
