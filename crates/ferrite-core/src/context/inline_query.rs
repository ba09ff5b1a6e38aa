//! Typed view over an inline query payload.

use serde_json::{Value, json};

use crate::client::{Bot, merge_params};
use crate::error::ApiResult;
use crate::model::RawInlineQuery;
use crate::registry::register_entity;

use super::user::UserContext;

/// An inline mode query awaiting results.
#[derive(Clone)]
pub struct InlineQueryContext {
    bot: Bot,
    raw: RawInlineQuery,
}

impl InlineQueryContext {
    /// Wraps a raw inline query.
    pub fn new(bot: Bot, raw: RawInlineQuery) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawInlineQuery {
        &self.raw
    }

    /// Unique query identifier.
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    /// Query text typed so far.
    pub fn query(&self) -> &str {
        &self.raw.query
    }

    /// Pagination offset previously returned by the bot.
    pub fn offset(&self) -> &str {
        &self.raw.offset
    }

    /// The querying user.
    pub fn from(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Answers with a result list.
    pub async fn answer(&self, results: Value) -> ApiResult<()> {
        self.answer_with(json!({ "results": results })).await
    }

    /// Answers with caller-controlled parameters (`cache_time`,
    /// `next_offset`, ...); caller keys override the derived query id.
    pub async fn answer_with(&self, params: Value) -> ApiResult<()> {
        let defaults = json!({ "inline_query_id": self.raw.id });
        self.bot
            .call("answerInlineQuery", merge_params(defaults, params))
            .await?;
        Ok(())
    }
}

register_entity!("inline_query", RawInlineQuery, InlineQueryContext);
