//! Rate domain — PKOIN exchange rate and the price-feed status.
//!
//! A feed failure is not an error: the rate falls back to zero and the
//! status records why, so pricing keeps producing (zero) values.

#[cfg(feature = "http")]
pub mod client;
#[cfg(feature = "http")]
pub mod feed;
pub mod state;

use crate::shared::QuoteCurrency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
pub use feed::PriceFeed;
pub use state::FeedState;

// ─── ExchangeRate ────────────────────────────────────────────────────────────

/// Price of one PKOIN in each quote currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    #[serde(rename = "USD")]
    pub usd: Decimal,
    #[serde(rename = "RUB")]
    pub rub: Decimal,
}

impl ExchangeRate {
    /// Fallback used while the feed is pending or degraded.
    pub const ZERO: ExchangeRate = ExchangeRate {
        usd: Decimal::ZERO,
        rub: Decimal::ZERO,
    };

    pub fn rate(&self, currency: QuoteCurrency) -> Decimal {
        match currency {
            QuoteCurrency::Usd => self.usd,
            QuoteCurrency::Rub => self.rub,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.usd.is_zero() && self.rub.is_zero()
    }
}

// ─── FeedStatus ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedStatus {
    /// No refresh has completed yet.
    #[default]
    Pending,
    Live,
    /// The last refresh failed; the rate is zero.
    Degraded { reason: String },
}

impl FeedStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_wire_names() {
        let rate: ExchangeRate = serde_json::from_str(r#"{"USD": 0.42, "RUB": 38.5}"#).unwrap();
        assert_eq!(rate.rate(QuoteCurrency::Usd), Decimal::new(42, 2));
        assert_eq!(rate.rate(QuoteCurrency::Rub), Decimal::new(385, 1));
        assert!(!rate.is_zero());
    }

    #[test]
    fn test_missing_currency_is_rejected() {
        let err = serde_json::from_str::<ExchangeRate>(
            r#"{"Response": "Error", "Message": "fsym is not a valid coin"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_zero_and_status() {
        assert!(ExchangeRate::ZERO.is_zero());
        assert_eq!(ExchangeRate::default(), ExchangeRate::ZERO);
        assert!(!FeedStatus::default().is_live());
        let degraded = FeedStatus::Degraded {
            reason: "timeout".to_string(),
        };
        assert!(degraded.is_degraded());
        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["reason"], "timeout");
    }
}
