//! Wire types for orders served by the REST API.

use crate::shared::{Address, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Order record as returned by `GET /orders` and friends.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub id: OrderId,
    pub unit_price: Decimal,
    pub currency: String,
    pub fiat_currency: String,
    pub fiat_price: Decimal,
    pub payment_method: String,
    #[serde(default)]
    pub counterparty_address: Address,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_proof: Option<String>,
}
