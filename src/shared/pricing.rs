//! Derived pricing: unit price and order limits from a maker margin and the
//! live exchange rate.
//!
//! All functions are pure and never panic. A zero rate (the degraded feed
//! fallback) yields zero outputs. Products too large for `Decimal` saturate
//! at `Decimal::MAX` (or `Decimal::MIN` for a negative product). Negative
//! margins or `max < min` are caller preconditions and are not checked here;
//! see `MakerOffer::validate`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fiat limits of an order derived from a maker's PKOIN limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBounds {
    pub min_quote: Decimal,
    pub max_quote: Decimal,
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `a × b`, saturating instead of overflowing.
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        if a.is_sign_negative() != b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Price of one PKOIN in the quote currency.
pub fn unit_price(margin: Decimal, rate: Decimal) -> Decimal {
    round2(saturating_mul(margin, rate))
}

/// Quote-currency limits for an order of `min_pkoin..=max_pkoin`.
pub fn order_bounds(
    min_pkoin: Decimal,
    max_pkoin: Decimal,
    margin: Decimal,
    rate: Decimal,
) -> OrderBounds {
    OrderBounds {
        min_quote: round2(saturating_mul(saturating_mul(min_pkoin, rate), margin)),
        max_quote: round2(saturating_mul(saturating_mul(max_pkoin, rate), margin)),
    }
}

/// Fiat amount due for `pkoin` units at `unit_price`.
pub fn fiat_for_pkoin(pkoin: Decimal, unit_price: Decimal) -> Decimal {
    round2(saturating_mul(pkoin, unit_price))
}
