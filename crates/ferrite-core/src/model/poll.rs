//! Raw poll payloads.

use serde::{Deserialize, Serialize};

use super::chat::RawChat;
use super::user::RawUser;

/// One answer option of a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPollOption {
    /// Option text.
    pub text: String,
    /// Number of voters for this option.
    #[serde(default)]
    pub voter_count: i64,
}

/// A native poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoll {
    /// Unique poll identifier.
    pub id: String,
    /// Poll question.
    #[serde(default)]
    pub question: String,
    /// Answer options.
    #[serde(default)]
    pub options: Vec<RawPollOption>,
    /// Total number of voters.
    #[serde(default)]
    pub total_voter_count: i64,
    /// Whether the poll is closed.
    #[serde(default)]
    pub is_closed: bool,
    /// Whether the poll is anonymous.
    #[serde(default)]
    pub is_anonymous: bool,
    /// Poll kind ("regular" or "quiz").
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Whether multiple answers are allowed.
    #[serde(default)]
    pub allows_multiple_answers: bool,
    /// Index of the correct option, for closed quiz polls.
    #[serde(default)]
    pub correct_option_id: Option<i64>,
}

/// A vote change in a non-anonymous poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPollAnswer {
    /// Identifier of the poll voted in.
    pub poll_id: String,
    /// The voter, when the vote was cast as a user.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// The voter chat, when the vote was cast on behalf of a chat.
    #[serde(default)]
    pub voter_chat: Option<RawChat>,
    /// Chosen option indexes; empty when the vote was retracted.
    #[serde(default)]
    pub option_ids: Vec<i64>,
}
