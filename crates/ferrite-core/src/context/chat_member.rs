//! Typed view over a membership status change.
//!
//! Member status is a polymorphic union on the wire: one `status` tag
//! selects which of the other fields apply. [`MemberRole`] narrows the
//! flat raw struct into one variant per tag, with an explicit
//! `Unknown` arm for tags this build does not recognize — those yield
//! no per-tag data but never an error.

use crate::client::Bot;
use crate::model::{MemberStatus, RawChatMember, RawChatMemberUpdated};
use crate::registry::register_entity;

use super::chat::ChatContext;
use super::user::UserContext;

// =============================================================================
// MemberRole
// =============================================================================

/// One member record narrowed by its status tag.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberRole {
    /// Chat owner.
    Creator {
        /// Custom title shown instead of "owner", when set.
        custom_title: Option<String>,
    },
    /// Administrator with elevated rights.
    Administrator {
        /// Custom title, when set.
        custom_title: Option<String>,
        /// Whether the administrator may delete others' messages.
        can_delete_messages: bool,
        /// Whether the administrator may restrict members.
        can_restrict_members: bool,
    },
    /// Ordinary member.
    Member,
    /// Member under restrictions.
    Restricted {
        /// Whether the user is still in the chat.
        is_member: bool,
        /// Whether the user may send messages.
        can_send_messages: bool,
        /// Unix expiry of the restrictions; 0 means forever.
        until_date: i64,
    },
    /// Not a member.
    Left,
    /// Banned.
    Kicked {
        /// Unix expiry of the ban; 0 means forever.
        until_date: i64,
    },
    /// Status tag unrecognized by this build.
    Unknown,
}

impl MemberRole {
    /// Narrows a raw member record by its status tag.
    pub fn from_raw(raw: &RawChatMember) -> Self {
        match raw.status {
            MemberStatus::Creator => MemberRole::Creator {
                custom_title: raw.custom_title.clone(),
            },
            MemberStatus::Administrator => MemberRole::Administrator {
                custom_title: raw.custom_title.clone(),
                can_delete_messages: raw.can_delete_messages.unwrap_or(false),
                can_restrict_members: raw.can_restrict_members.unwrap_or(false),
            },
            MemberStatus::Member => MemberRole::Member,
            MemberStatus::Restricted => MemberRole::Restricted {
                is_member: raw.is_member.unwrap_or(false),
                can_send_messages: raw.can_send_messages.unwrap_or(false),
                until_date: raw.until_date.unwrap_or(0),
            },
            MemberStatus::Left => MemberRole::Left,
            MemberStatus::Kicked => MemberRole::Kicked {
                until_date: raw.until_date.unwrap_or(0),
            },
            MemberStatus::Unknown => MemberRole::Unknown,
        }
    }
}

// =============================================================================
// ChatMemberUpdatedContext
// =============================================================================

/// A change in somebody's membership status.
#[derive(Clone)]
pub struct ChatMemberUpdatedContext {
    bot: Bot,
    raw: RawChatMemberUpdated,
}

impl ChatMemberUpdatedContext {
    /// Wraps a raw membership change.
    pub fn new(bot: Bot, raw: RawChatMemberUpdated) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawChatMemberUpdated {
        &self.raw
    }

    /// The chat the change happened in.
    pub fn chat(&self) -> ChatContext {
        ChatContext::new(self.bot.clone(), self.raw.chat.clone())
    }

    /// The user who performed the change.
    pub fn actor(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    /// The user whose membership changed.
    pub fn subject(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.new_chat_member.user.clone())
    }

    /// Unix time of the change.
    pub fn date(&self) -> i64 {
        self.raw.date
    }

    /// Status tag before the change.
    pub fn old_status(&self) -> MemberStatus {
        self.raw.old_chat_member.status
    }

    /// Status tag after the change.
    pub fn new_status(&self) -> MemberStatus {
        self.raw.new_chat_member.status
    }

    /// The old membership narrowed by its tag.
    pub fn old_role(&self) -> MemberRole {
        MemberRole::from_raw(&self.raw.old_chat_member)
    }

    /// The new membership narrowed by its tag.
    pub fn new_role(&self) -> MemberRole {
        MemberRole::from_raw(&self.raw.new_chat_member)
    }

    /// Whether this change is a join: the subject went from outside the
    /// chat to inside it.
    pub fn joined(&self) -> bool {
        !self.old_status().is_present() && self.new_status().is_present()
    }

    /// Whether this change is a leave or removal.
    pub fn left(&self) -> bool {
        self.old_status().is_present() && !self.new_status().is_present()
    }
}

register_entity!("chat_member", RawChatMemberUpdated, ChatMemberUpdatedContext);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Transport;
    use crate::error::ApiResult;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct NoopTransport;

    #[async_trait]
    impl Transport for NoopTransport {
        async fn call(&self, _method: &str, _params: Value) -> ApiResult<Value> {
            Ok(Value::Null)
        }
    }

    fn updated(old_status: &str, new_status: &str) -> ChatMemberUpdatedContext {
        let raw = serde_json::from_value(json!({
            "chat": {"id": -100, "type": "supergroup"},
            "from": {"id": 1, "first_name": "admin"},
            "date": 0,
            "old_chat_member": {
                "user": {"id": 2, "first_name": "subject"},
                "status": old_status
            },
            "new_chat_member": {
                "user": {"id": 2, "first_name": "subject"},
                "status": new_status,
                "until_date": 500
            }
        }))
        .unwrap();
        ChatMemberUpdatedContext::new(Bot::new(Arc::new(NoopTransport)), raw)
    }

    #[test]
    fn join_and_leave_detection() {
        assert!(updated("left", "member").joined());
        assert!(updated("member", "kicked").left());
        assert!(!updated("member", "administrator").joined());
    }

    #[test]
    fn roles_narrow_by_tag() {
        let ctx = updated("member", "kicked");
        assert_eq!(ctx.old_role(), MemberRole::Member);
        assert_eq!(ctx.new_role(), MemberRole::Kicked { until_date: 500 });
    }

    #[test]
    fn unrecognized_tag_yields_unknown_role() {
        let ctx = updated("member", "cosmic_overseer");
        assert_eq!(ctx.new_status(), MemberStatus::Unknown);
        assert_eq!(ctx.new_role(), MemberRole::Unknown);
    }
}
