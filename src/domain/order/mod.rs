//! Order domain — orders served by the API, status lifecycle, render views.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::domain::payment::PaymentStep;
use crate::shared::{fmt, Address, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use state::ServedOrders;

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Order status as reported by the remote API.
///
/// `Paid` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
        }
    }

    /// Human-readable label for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting confirmation",
            Self::Paid => "Confirmed",
            Self::Canceled => "Declined",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Canceled)
    }

    /// `pending → paid | canceled`; terminal states only accept themselves.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match self {
            Self::Pending => true,
            terminal => *terminal == next,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A validated, domain-level order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub unit_price: Decimal,
    pub currency: String,
    pub fiat_currency: String,
    pub fiat_price: Decimal,
    pub payment_method: String,
    pub counterparty_address: Address,
    pub status: OrderStatus,
    /// Server path of the uploaded proof; `None` until one is uploaded.
    pub payment_proof: Option<String>,
}

impl Order {
    pub fn has_proof(&self) -> bool {
        self.payment_proof.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderValidationError {
    #[error("order id is empty")]
    MissingId,
    #[error("order {id}: negative {field} {value}")]
    Negative {
        id: OrderId,
        field: &'static str,
        value: Decimal,
    },
}

// ─── OrderView ───────────────────────────────────────────────────────────────

/// Everything the order table needs to render one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: OrderId,
    /// Unit price with its currency, e.g. `99.00 RUB`.
    pub display_unit_price: String,
    /// Fiat total of the order with its currency, e.g. `4950.00 RUB`.
    pub display_fiat_bounds: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    /// Payment-step number, `None` until the buyer starts paying.
    pub step_number: Option<u8>,
    pub counterparty: String,
}

impl OrderView {
    pub fn new(order: &Order, step: Option<PaymentStep>) -> Self {
        let counterparty = if order.counterparty_address.is_empty() {
            "-".to_string()
        } else {
            order.counterparty_address.to_string()
        };
        Self {
            order_id: order.id.clone(),
            display_unit_price: fmt::priced(&order.unit_price, &order.currency),
            display_fiat_bounds: fmt::priced(&order.fiat_price, &order.fiat_currency),
            status: order.status,
            status_label: order.status.label(),
            step_number: step.map(|s| s.number()),
            counterparty,
        }
    }
}
