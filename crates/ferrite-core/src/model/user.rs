//! Raw user payload.

use serde::{Deserialize, Serialize};

/// A platform user or bot account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    /// Unique user identifier.
    pub id: i64,
    /// Whether this account is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// First name (always present on the wire).
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Username without the leading `@`.
    #[serde(default)]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default)]
    pub language_code: Option<String>,
    /// Whether the user has a premium subscription.
    #[serde(default)]
    pub is_premium: Option<bool>,
}
