//! Feed state container — the last known rate and how it was obtained.

use super::{ExchangeRate, FeedStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub rate: ExchangeRate,
    pub status: FeedStatus,
    /// When the last refresh finished, successful or not.
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_live(&mut self, rate: ExchangeRate) {
        self.rate = rate;
        self.status = FeedStatus::Live;
        self.updated_at = Some(Utc::now());
    }

    /// Fall back to the zero rate.
    pub fn apply_degraded(&mut self, reason: impl Into<String>) {
        self.rate = ExchangeRate::ZERO;
        self.status = FeedStatus::Degraded {
            reason: reason.into(),
        };
        self.updated_at = Some(Utc::now());
    }
}
