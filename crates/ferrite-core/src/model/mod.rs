//! Raw wire model for the bot platform.
//!
//! These structs mirror the platform's JSON payloads one-to-one. Every
//! field the platform marks optional is an `Option` with
//! `#[serde(default)]`, and unknown keys are ignored on decode, so the
//! model tolerates forward-compatible platform additions.
//!
//! Contexts (see [`crate::context`]) wrap these structs; application
//! code normally never touches them directly.

pub mod callback;
pub mod chat;
pub mod inline;
pub mod join_request;
pub mod location;
pub mod member;
pub mod message;
pub mod payments;
pub mod poll;
pub mod update;
pub mod user;

pub use callback::RawCallbackQuery;
pub use chat::{ChatType, RawChat};
pub use inline::RawInlineQuery;
pub use join_request::RawChatJoinRequest;
pub use location::RawLocation;
pub use member::{MemberStatus, RawChatMember, RawChatMemberUpdated};
pub use message::{RawMessage, RawMessageEntity, RawServiceFields};
pub use payments::{RawOrderInfo, RawPreCheckoutQuery, RawShippingAddress, RawShippingQuery};
pub use poll::{RawPoll, RawPollAnswer, RawPollOption};
pub use update::{Update, UpdateKind};
pub use user::RawUser;
