//! Raw chat payload.

use serde::{Deserialize, Serialize};

/// Chat kind discriminant.
///
/// Closed tag set on the wire; unrecognized tags decode to
/// [`ChatType::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    /// One-to-one chat with a user.
    Private,
    /// Basic group.
    Group,
    /// Supergroup.
    Supergroup,
    /// Broadcast channel.
    Channel,
    /// Forward-compatible fallback for tags this build does not know.
    #[serde(other)]
    Unknown,
}

/// A chat of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChat {
    /// Unique chat identifier.
    pub id: i64,
    /// Chat kind.
    #[serde(rename = "type")]
    pub kind: ChatType,
    /// Title, for groups, supergroups and channels.
    #[serde(default)]
    pub title: Option<String>,
    /// Username, for private chats, supergroups and channels.
    #[serde(default)]
    pub username: Option<String>,
    /// First name of the other party in a private chat.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name of the other party in a private chat.
    #[serde(default)]
    pub last_name: Option<String>,
}
