//! Raw inline query payload.

use serde::{Deserialize, Serialize};

use super::user::RawUser;

/// An incoming inline query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInlineQuery {
    /// Unique query identifier.
    pub id: String,
    /// The user issuing the query.
    pub from: RawUser,
    /// Query text, up to the platform's length limit.
    #[serde(default)]
    pub query: String,
    /// Pagination offset, controlled by the bot.
    #[serde(default)]
    pub offset: String,
    /// Kind of chat the query was sent from, when known.
    #[serde(default)]
    pub chat_type: Option<String>,
}
