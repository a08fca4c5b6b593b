//! Price feed — unauthenticated rate fetch with zero-rate fallback.

use super::{ExchangeRate, FeedState};
use crate::error::{HttpError, SdkError};
use async_lock::RwLock;
use reqwest::Client;
use std::sync::Arc;

/// Fetches the PKOIN rate and keeps the last result observable.
///
/// Cloning shares the state, so a spawned refresh updates every clone.
#[derive(Clone)]
pub struct PriceFeed {
    url: String,
    client: Client,
    state: Arc<RwLock<FeedState>>,
}

impl PriceFeed {
    pub fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
            state: Arc::new(RwLock::new(FeedState::new())),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch once and record the outcome. Never fails: on any error the rate
    /// becomes zero and the status turns degraded.
    pub async fn refresh(&self) -> ExchangeRate {
        match self.fetch().await {
            Ok(rate) => {
                tracing::debug!(usd = %rate.usd, rub = %rate.rub, "Price feed updated");
                self.state.write().await.apply_live(rate);
                rate
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Price feed degraded, using zero rate");
                self.state.write().await.apply_degraded(e.to_string());
                ExchangeRate::ZERO
            }
        }
    }

    /// Run one refresh in the background.
    ///
    /// The handle resolves to the rate the refresh recorded; callers that
    /// drop it still observe the outcome through [`PriceFeed::snapshot`].
    #[cfg(feature = "rt-tokio")]
    pub fn spawn(&self) -> tokio::task::JoinHandle<ExchangeRate> {
        let feed = self.clone();
        tokio::spawn(async move { feed.refresh().await })
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    /// Last recorded rate; zero while pending or degraded.
    pub async fn current_rate(&self) -> ExchangeRate {
        self.state.read().await.rate
    }

    async fn fetch(&self) -> Result<ExchangeRate, SdkError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(HttpError::from)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        let bytes = resp.bytes().await.map_err(HttpError::from)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for PriceFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceFeed")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
