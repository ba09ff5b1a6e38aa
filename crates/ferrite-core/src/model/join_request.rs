//! Raw chat join request payload.

use serde::{Deserialize, Serialize};

use super::chat::RawChat;
use super::user::RawUser;

/// A pending request to join a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChatJoinRequest {
    /// The chat being joined.
    pub chat: RawChat,
    /// The requesting user.
    pub from: RawUser,
    /// Private-chat id the bot may use to contact the requester until
    /// the request is processed.
    #[serde(default)]
    pub user_chat_id: Option<i64>,
    /// Unix time of the request.
    #[serde(default)]
    pub date: i64,
    /// Bio of the requesting user.
    #[serde(default)]
    pub bio: Option<String>,
    /// Invite link the request was made through.
    #[serde(default)]
    pub invite_link: Option<serde_json::Value>,
}
