//! Offers sub-client.

use crate::client::P2pClient;
use crate::domain::offer::{MakerOffer, OfferView};
use crate::error::SdkError;
use crate::shared::QuoteCurrency;

/// Sub-client for maker offers.
pub struct Offers<'a> {
    pub(crate) client: &'a P2pClient,
}

impl<'a> Offers<'a> {
    /// Offers published by makers. Offers failing validation are skipped.
    pub async fn list(&self) -> Result<Vec<MakerOffer>, SdkError> {
        let offers: Vec<MakerOffer> = self.client.http.get("/offers").await?;
        Ok(offers
            .into_iter()
            .filter(|offer| match offer.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(offer_id = %offer.id, error = %e, "Skipping invalid offer");
                    false
                }
            })
            .collect())
    }

    /// Render rows at the current feed rate for `currency`.
    pub async fn views(&self, currency: QuoteCurrency) -> Result<Vec<OfferView>, SdkError> {
        let offers = self.list().await?;
        let rate = self.client.feed.current_rate().await.rate(currency);
        Ok(offers
            .iter()
            .map(|offer| OfferView::new(offer, rate, currency))
            .collect())
    }
}
