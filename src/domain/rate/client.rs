//! Rates sub-client — the client's price feed and quotes at its rate.

use super::{ExchangeRate, FeedState};
use crate::client::P2pClient;
use crate::domain::offer::{MakerOffer, OfferQuote};
use crate::shared::QuoteCurrency;

pub struct Rates<'a> {
    pub(crate) client: &'a P2pClient,
}

impl<'a> Rates<'a> {
    pub async fn refresh(&self) -> ExchangeRate {
        self.client.feed.refresh().await
    }

    pub async fn snapshot(&self) -> FeedState {
        self.client.feed.snapshot().await
    }

    pub async fn current(&self) -> ExchangeRate {
        self.client.feed.current_rate().await
    }

    /// Quote an offer at the current rate. Zero while the feed is degraded.
    pub async fn quote(&self, offer: &MakerOffer, currency: QuoteCurrency) -> OfferQuote {
        offer.quote(self.current().await.rate(currency))
    }
}
