//! Offer domain — maker offers and their derived quotes.
//!
//! Offers are immutable reference data served by the API. Prices are never
//! stored: they are derived from the maker's margin and the live rate each
//! time a quote is taken.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::pricing::{order_bounds, unit_price, OrderBounds};
use crate::shared::{fmt, Address, QuoteCurrency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// ─── OfferDetail ─────────────────────────────────────────────────────────────

/// One payment option of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    /// Fiat currencies accepted through this option.
    #[serde(default)]
    pub currency: BTreeSet<String>,
    #[serde(alias = "paymentMethods")]
    pub payment_method: String,
    #[serde(default)]
    pub instructions: String,
    /// Regions the option is offered to.
    #[serde(default)]
    pub available_for: BTreeSet<String>,
}

// ─── MakerOffer ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerOffer {
    #[serde(default)]
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub avatar: String,
    pub address: Address,
    #[serde(default)]
    pub completed_orders: u32,
    #[serde(default)]
    pub transfer_time: String,
    #[serde(default)]
    pub telegram: Option<String>,
    pub margin: Decimal,
    pub min_pkoin: Decimal,
    pub max_pkoin: Decimal,
    #[serde(default)]
    pub details: Vec<OfferDetail>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OfferValidationError {
    #[error("offer {id}: margin must be positive, got {margin}")]
    NonPositiveMargin { id: String, margin: Decimal },
    #[error("offer {id}: negative minimum {min}")]
    NegativeMin { id: String, min: Decimal },
    #[error("offer {id}: maximum {max} below minimum {min}")]
    InvertedLimits {
        id: String,
        min: Decimal,
        max: Decimal,
    },
}

/// Prices of an offer at one exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferQuote {
    pub unit_price: Decimal,
    pub bounds: OrderBounds,
}

impl MakerOffer {
    /// Check the invariants pricing relies on.
    pub fn validate(&self) -> Result<(), OfferValidationError> {
        if self.margin <= Decimal::ZERO {
            return Err(OfferValidationError::NonPositiveMargin {
                id: self.id.clone(),
                margin: self.margin,
            });
        }
        if self.min_pkoin < Decimal::ZERO {
            return Err(OfferValidationError::NegativeMin {
                id: self.id.clone(),
                min: self.min_pkoin,
            });
        }
        if self.max_pkoin < self.min_pkoin {
            return Err(OfferValidationError::InvertedLimits {
                id: self.id.clone(),
                min: self.min_pkoin,
                max: self.max_pkoin,
            });
        }
        Ok(())
    }

    pub fn quote(&self, rate: Decimal) -> OfferQuote {
        OfferQuote {
            unit_price: unit_price(self.margin, rate),
            bounds: order_bounds(self.min_pkoin, self.max_pkoin, self.margin, rate),
        }
    }

    pub fn accepts_currency(&self, currency: &str) -> bool {
        self.details
            .iter()
            .any(|d| d.currency.iter().any(|c| c.eq_ignore_ascii_case(currency)))
    }

    pub fn available_for(&self, region: &str) -> bool {
        self.details
            .iter()
            .any(|d| d.available_for.iter().any(|r| r.eq_ignore_ascii_case(region)))
    }

    /// Distinct payment methods in detail order.
    pub fn payment_methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = Vec::new();
        for detail in &self.details {
            if !methods.contains(&detail.payment_method.as_str()) {
                methods.push(detail.payment_method.as_str());
            }
        }
        methods
    }
}

// ─── OfferView ───────────────────────────────────────────────────────────────

/// Everything the offer table needs to render one maker row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    pub offer_id: String,
    pub user_name: String,
    pub completed_orders: u32,
    pub transfer_time: String,
    /// Unit price with its symbol, e.g. `₽99.00`.
    pub display_unit_price: String,
    /// e.g. `500 PKOIN / ₽4950.00 - ₽49500.00`.
    pub display_limits: String,
    pub payment_methods: Vec<String>,
}

impl OfferView {
    pub fn new(offer: &MakerOffer, rate: Decimal, currency: QuoteCurrency) -> Self {
        let quote = offer.quote(rate);
        Self {
            offer_id: offer.id.clone(),
            user_name: offer.user_name.clone(),
            completed_orders: offer.completed_orders,
            transfer_time: offer.transfer_time.clone(),
            display_unit_price: fmt::money(&quote.unit_price, currency),
            display_limits: format!(
                "{} PKOIN / {} - {}",
                offer.max_pkoin.normalize(),
                fmt::money(&quote.bounds.min_quote, currency),
                fmt::money(&quote.bounds.max_quote, currency),
            ),
            payment_methods: offer
                .payment_methods()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
