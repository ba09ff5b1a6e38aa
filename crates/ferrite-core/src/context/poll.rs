//! Typed views over poll payloads.

use crate::client::Bot;
use crate::model::{RawPoll, RawPollAnswer, RawPollOption};
use crate::registry::register_entity;

use super::chat::ChatContext;
use super::user::UserContext;

// =============================================================================
// PollContext
// =============================================================================

/// A native poll's state.
#[derive(Clone)]
pub struct PollContext {
    #[allow(dead_code)]
    bot: Bot,
    raw: RawPoll,
}

impl PollContext {
    /// Wraps a raw poll.
    pub fn new(bot: Bot, raw: RawPoll) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawPoll {
        &self.raw
    }

    /// Poll identifier.
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    /// Poll question.
    pub fn question(&self) -> &str {
        &self.raw.question
    }

    /// Answer options.
    pub fn options(&self) -> &[RawPollOption] {
        &self.raw.options
    }

    /// Total number of voters.
    pub fn total_voters(&self) -> i64 {
        self.raw.total_voter_count
    }

    /// Whether the poll is closed.
    pub fn is_closed(&self) -> bool {
        self.raw.is_closed
    }

    /// Whether the poll is a quiz.
    pub fn is_quiz(&self) -> bool {
        self.raw.kind == "quiz"
    }

    /// The option with the most votes so far, when any option exists.
    pub fn leading_option(&self) -> Option<&RawPollOption> {
        self.raw.options.iter().max_by_key(|opt| opt.voter_count)
    }
}

register_entity!("poll", RawPoll, PollContext);

// =============================================================================
// PollAnswerContext
// =============================================================================

/// A vote change in a non-anonymous poll.
#[derive(Clone)]
pub struct PollAnswerContext {
    bot: Bot,
    raw: RawPollAnswer,
}

impl PollAnswerContext {
    /// Wraps a raw poll answer.
    pub fn new(bot: Bot, raw: RawPollAnswer) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawPollAnswer {
        &self.raw
    }

    /// Identifier of the poll voted in.
    pub fn poll_id(&self) -> &str {
        &self.raw.poll_id
    }

    /// The voter, when the vote was cast as a user.
    pub fn voter(&self) -> Option<UserContext> {
        self.raw
            .user
            .clone()
            .map(|user| UserContext::new(self.bot.clone(), user))
    }

    /// The voter chat, when the vote was cast on behalf of a chat.
    pub fn voter_chat(&self) -> Option<ChatContext> {
        self.raw
            .voter_chat
            .clone()
            .map(|chat| ChatContext::new(self.bot.clone(), chat))
    }

    /// Chosen option indexes.
    pub fn option_ids(&self) -> &[i64] {
        &self.raw.option_ids
    }

    /// Whether the vote was retracted.
    pub fn retracted(&self) -> bool {
        self.raw.option_ids.is_empty()
    }
}

register_entity!("poll_answer", RawPollAnswer, PollAnswerContext);

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

    fn bot() -> Bot {
        Bot::new(Arc::new(NoopTransport))
    }

    #[test]
    fn leading_option_picks_max() {
        let raw: RawPoll = serde_json::from_value(json!({
            "id": "p1",
            "question": "?",
            "options": [
                {"text": "a", "voter_count": 2},
                {"text": "b", "voter_count": 5},
                {"text": "c", "voter_count": 1}
            ]
        }))
        .unwrap();
        let poll = PollContext::new(bot(), raw);
        assert_eq!(poll.leading_option().map(|o| o.text.as_str()), Some("b"));
    }

    #[test]
    fn empty_option_ids_means_retracted() {
        let raw: RawPollAnswer =
            serde_json::from_value(json!({"poll_id": "p1", "option_ids": []})).unwrap();
        let answer = PollAnswerContext::new(bot(), raw);
        assert!(answer.retracted());
        assert!(answer.voter().is_none());
    }
}
