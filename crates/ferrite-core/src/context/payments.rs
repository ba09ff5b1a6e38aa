//! Typed views over payment flow payloads.

use serde_json::json;

use crate::client::Bot;
use crate::error::ApiResult;
use crate::model::{RawPreCheckoutQuery, RawShippingAddress, RawShippingQuery};
use crate::registry::register_entity;

use super::user::UserContext;

// =============================================================================
// PreCheckoutQueryContext
// =============================================================================

/// Final payment confirmation checkpoint; must be answered within the
/// platform's deadline.
#[derive(Clone)]
pub struct PreCheckoutQueryContext {
    bot: Bot,
    raw: RawPreCheckoutQuery,
}

impl PreCheckoutQueryContext {
    /// Wraps a raw pre-checkout query.
    pub fn new(bot: Bot, raw: RawPreCheckoutQuery) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawPreCheckoutQuery {
        &self.raw
    }

    /// Unique query identifier.
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    /// The paying user.
    pub fn from(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    /// Three-letter currency code.
    pub fn currency(&self) -> &str {
        &self.raw.currency
    }

    /// Total price in the currency's smallest unit.
    pub fn total_amount(&self) -> i64 {
        self.raw.total_amount
    }

    /// Bot-specified payload of the invoice being paid.
    pub fn invoice_payload(&self) -> &str {
        &self.raw.invoice_payload
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Confirms the checkout.
    pub async fn approve(&self) -> ApiResult<()> {
        self.bot.answer_pre_checkout_query(&self.raw.id, true).await
    }

    /// Rejects the checkout with a user-visible reason.
    pub async fn reject(&self, error_message: &str) -> ApiResult<()> {
        self.bot
            .call(
                "answerPreCheckoutQuery",
                json!({
                    "pre_checkout_query_id": self.raw.id,
                    "ok": false,
                    "error_message": error_message,
                }),
            )
            .await?;
        Ok(())
    }
}

register_entity!("pre_checkout_query", RawPreCheckoutQuery, PreCheckoutQueryContext);

// =============================================================================
// ShippingQueryContext
// =============================================================================

/// A request for shipping options during a flexible-price checkout.
#[derive(Clone)]
pub struct ShippingQueryContext {
    bot: Bot,
    raw: RawShippingQuery,
}

impl ShippingQueryContext {
    /// Wraps a raw shipping query.
    pub fn new(bot: Bot, raw: RawShippingQuery) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawShippingQuery {
        &self.raw
    }

    /// Unique query identifier.
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    /// The paying user.
    pub fn from(&self) -> UserContext {
        UserContext::new(self.bot.clone(), self.raw.from.clone())
    }

    /// Bot-specified payload of the invoice being paid.
    pub fn invoice_payload(&self) -> &str {
        &self.raw.invoice_payload
    }

    /// Destination address.
    pub fn address(&self) -> &RawShippingAddress {
        &self.raw.shipping_address
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Accepts with the given shipping options.
    pub async fn approve(&self, shipping_options: serde_json::Value) -> ApiResult<()> {
        self.bot
            .call(
                "answerShippingQuery",
                json!({
                    "shipping_query_id": self.raw.id,
                    "ok": true,
                    "shipping_options": shipping_options,
                }),
            )
            .await?;
        Ok(())
    }

    /// Rejects with a user-visible reason.
    pub async fn reject(&self, error_message: &str) -> ApiResult<()> {
        self.bot
            .call(
                "answerShippingQuery",
                json!({
                    "shipping_query_id": self.raw.id,
                    "ok": false,
                    "error_message": error_message,
                }),
            )
            .await?;
        Ok(())
    }
}

register_entity!("shipping_query", RawShippingQuery, ShippingQueryContext);
