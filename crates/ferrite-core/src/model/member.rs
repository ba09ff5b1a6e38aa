//! Raw chat member payloads and the member-status union.

use serde::{Deserialize, Serialize};

use super::chat::RawChat;
use super::user::RawUser;

/// Membership status discriminant.
///
/// The platform documents this as a closed set, but new tags appear
/// over time; unrecognized ones decode to [`MemberStatus::Unknown`]
/// instead of failing the whole envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Chat owner.
    Creator,
    /// Administrator with some elevated rights.
    Administrator,
    /// Ordinary member.
    Member,
    /// Member under restrictions.
    Restricted,
    /// Not a member, but free to join.
    Left,
    /// Banned.
    Kicked,
    /// Forward-compatible fallback.
    #[serde(other)]
    Unknown,
}

impl MemberStatus {
    /// Whether this status counts as being inside the chat.
    pub fn is_present(self) -> bool {
        matches!(
            self,
            MemberStatus::Creator
                | MemberStatus::Administrator
                | MemberStatus::Member
                | MemberStatus::Restricted
        )
    }
}

/// One member record: the status tag plus the union of every
/// status-specific optional field.
///
/// Which optional fields are meaningful depends on `status`; the typed
/// view in [`crate::context::chat_member`] narrows them per tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChatMember {
    /// The member's user record.
    pub user: RawUser,
    /// Status tag selecting which other fields apply.
    pub status: MemberStatus,
    /// Custom title, for creators and administrators.
    #[serde(default)]
    pub custom_title: Option<String>,
    /// Whether the member's presence is hidden, for creators and
    /// administrators.
    #[serde(default)]
    pub is_anonymous: Option<bool>,
    /// Whether a restricted user is still a member of the chat.
    #[serde(default)]
    pub is_member: Option<bool>,
    /// Whether a restricted user may send messages.
    #[serde(default)]
    pub can_send_messages: Option<bool>,
    /// Whether an administrator may manage the chat.
    #[serde(default)]
    pub can_manage_chat: Option<bool>,
    /// Whether an administrator may delete others' messages.
    #[serde(default)]
    pub can_delete_messages: Option<bool>,
    /// Whether an administrator may restrict members.
    #[serde(default)]
    pub can_restrict_members: Option<bool>,
    /// Unix time restrictions or the ban expire; 0 means forever.
    #[serde(default)]
    pub until_date: Option<i64>,
}

/// A change in somebody's membership status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChatMemberUpdated {
    /// The chat the change happened in.
    pub chat: RawChat,
    /// The user who performed the change.
    pub from: RawUser,
    /// Unix time of the change.
    #[serde(default)]
    pub date: i64,
    /// Membership before the change.
    pub old_chat_member: RawChatMember,
    /// Membership after the change.
    pub new_chat_member: RawChatMember,
    /// Invite link used to join, when the change is a join via link.
    #[serde(default)]
    pub invite_link: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_status_decodes_to_unknown() {
        let member: RawChatMember = serde_json::from_str(
            r#"{"user": {"id": 1, "first_name": "a"}, "status": "overlord"}"#,
        )
        .unwrap();
        assert_eq!(member.status, MemberStatus::Unknown);
    }
}
