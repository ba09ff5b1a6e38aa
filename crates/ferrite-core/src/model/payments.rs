//! Raw payment flow payloads: pre-checkout and shipping queries.

use serde::{Deserialize, Serialize};

use super::user::RawUser;

/// A shipping address supplied by the paying user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShippingAddress {
    /// Two-letter country code.
    #[serde(default)]
    pub country_code: String,
    /// State, when applicable.
    #[serde(default)]
    pub state: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// First address line.
    #[serde(default)]
    pub street_line1: String,
    /// Second address line.
    #[serde(default)]
    pub street_line2: String,
    /// Postal code.
    #[serde(default)]
    pub post_code: String,
}

/// Order information collected during checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrderInfo {
    /// Payer's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Payer's phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Payer's email.
    #[serde(default)]
    pub email: Option<String>,
    /// Shipping address, when requested.
    #[serde(default)]
    pub shipping_address: Option<RawShippingAddress>,
}

/// Final confirmation checkpoint of a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPreCheckoutQuery {
    /// Unique query identifier.
    pub id: String,
    /// The paying user.
    pub from: RawUser,
    /// Three-letter currency code.
    #[serde(default)]
    pub currency: String,
    /// Total price in the currency's smallest unit.
    #[serde(default)]
    pub total_amount: i64,
    /// Bot-specified payload of the invoice being paid.
    #[serde(default)]
    pub invoice_payload: String,
    /// Identifier of the chosen shipping option, when applicable.
    #[serde(default)]
    pub shipping_option_id: Option<String>,
    /// Order info, when collected.
    #[serde(default)]
    pub order_info: Option<RawOrderInfo>,
}

/// A request for shipping options for a flexible-price invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShippingQuery {
    /// Unique query identifier.
    pub id: String,
    /// The paying user.
    pub from: RawUser,
    /// Bot-specified payload of the invoice being paid.
    #[serde(default)]
    pub invoice_payload: String,
    /// Destination address.
    #[serde(default)]
    pub shipping_address: RawShippingAddress,
}
