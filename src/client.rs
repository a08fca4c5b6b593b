//! High-level client — `P2pClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared working-set state, and the
//! accessor methods.

use crate::auth::SigningGateway;
use crate::domain::offer::client::Offers;
use crate::domain::order::client::Orders;
use crate::domain::order::ServedOrders;
use crate::domain::payment::client::Payments;
use crate::domain::payment::PaymentSteps;
use crate::domain::rate::client::Rates;
use crate::domain::rate::PriceFeed;
use crate::error::{HttpError, SdkError};
use crate::http::SignedTransport;
use crate::network;

use async_lock::RwLock;
use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::offer::client::Offers as OffersClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::payment::client::Payments as PaymentsClient;
pub use crate::domain::rate::client::Rates as RatesClient;

/// The primary entry point for the P2P SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.payments()`, etc.
///
/// The price feed is fetched once per client: either build with
/// [`P2pClientBuilder::start_feed`] inside a tokio runtime, or call
/// [`P2pClient::start_price_feed`] (or `rates().refresh()`) yourself. Until
/// then every rate is zero.
pub struct P2pClient {
    pub(crate) http: SignedTransport,
    pub(crate) feed: PriceFeed,
    /// Payment-step entries, one per order the buyer started paying.
    pub(crate) payments: Arc<PaymentSteps>,
    /// Orders currently served by the API.
    pub(crate) served: Arc<RwLock<ServedOrders>>,
}

impl P2pClient {
    pub fn builder() -> P2pClientBuilder {
        P2pClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    pub fn offers(&self) -> Offers<'_> {
        Offers { client: self }
    }

    pub fn rates(&self) -> Rates<'_> {
        Rates { client: self }
    }

    /// Underlying signed transport, for endpoints without a sub-client.
    pub fn http(&self) -> &SignedTransport {
        &self.http
    }

    /// Start the one-shot background rate refresh.
    ///
    /// Until it finishes the rate is zero and the feed status is pending.
    #[cfg(feature = "rt-tokio")]
    pub fn start_price_feed(&self) -> tokio::task::JoinHandle<crate::domain::rate::ExchangeRate> {
        self.feed.spawn()
    }

    /// Drop the working set and every payment entry.
    pub async fn clear(&self) {
        self.served.write().await.clear();
        let dropped = self.payments.retain(|_| false).await;
        if !dropped.is_empty() {
            tracing::debug!(count = dropped.len(), "Cleared payment entries");
        }
    }
}

impl Clone for P2pClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            feed: self.feed.clone(),
            payments: self.payments.clone(),
            served: self.served.clone(),
        }
    }
}

impl std::fmt::Debug for P2pClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("P2pClient")
            .field("http", &self.http)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct P2pClientBuilder {
    base_url: String,
    price_feed_url: String,
    signer: Option<Arc<dyn SigningGateway>>,
    http_client: Option<reqwest::Client>,
    #[cfg(feature = "rt-tokio")]
    start_feed: bool,
}

impl Default for P2pClientBuilder {
    fn default() -> Self {
        Self {
            base_url: network::DEFAULT_API_URL.to_string(),
            price_feed_url: network::DEFAULT_PRICE_FEED_URL.to_string(),
            signer: None,
            http_client: None,
            #[cfg(feature = "rt-tokio")]
            start_feed: false,
        }
    }
}

impl P2pClientBuilder {
    /// Defaults overridden by `PKOIN_P2P_API_URL` and `PKOIN_P2P_PRICE_FEED_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = env_url(network::API_URL_ENV) {
            builder.base_url = url;
        }
        if let Some(url) = env_url(network::PRICE_FEED_URL_ENV) {
            builder.price_feed_url = url;
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn price_feed_url(mut self, url: &str) -> Self {
        self.price_feed_url = url.to_string();
        self
    }

    /// External wallet/identity service that signs every API request.
    pub fn signer(mut self, signer: Arc<dyn SigningGateway>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Use a preconfigured client, e.g. with a request timeout.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Spawn the price-feed refresh as soon as the client is built.
    ///
    /// Needs a running tokio runtime; without one the flag is ignored with a
    /// warning and the feed stays pending.
    #[cfg(feature = "rt-tokio")]
    pub fn start_feed(mut self, start: bool) -> Self {
        self.start_feed = start;
        self
    }

    pub fn build(self) -> Result<P2pClient, SdkError> {
        let signer = self
            .signer
            .ok_or_else(|| SdkError::Validation("a signer is required".to_string()))?;

        let client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .pool_max_idle_per_host(10)
                .build()
                .map_err(HttpError::from)?,
        };

        let p2p = P2pClient {
            http: SignedTransport::with_client(&self.base_url, client.clone(), signer),
            feed: PriceFeed::new(&self.price_feed_url, client),
            payments: Arc::new(PaymentSteps::new()),
            served: Arc::new(RwLock::new(ServedOrders::new())),
        };

        #[cfg(feature = "rt-tokio")]
        if self.start_feed {
            if tokio::runtime::Handle::try_current().is_ok() {
                let _ = p2p.start_price_feed();
            } else {
                tracing::warn!("No tokio runtime at build time, price feed not started");
            }
        }

        Ok(p2p)
    }
}

fn env_url(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Signature;
    use crate::error::SigningError;
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl SigningGateway for Fixed {
        async fn sign(&self, _scope: &str) -> Result<Signature, SigningError> {
            Ok(Signature::new(serde_json::json!({ "sig": "abc" })))
        }
    }

    #[test]
    fn test_build_requires_signer() {
        let err = P2pClient::builder().build().unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_build_with_defaults() {
        let client = P2pClient::builder().signer(Arc::new(Fixed)).build().unwrap();
        assert_eq!(client.http().base_url(), network::DEFAULT_API_URL);
        assert_eq!(client.feed.url(), network::DEFAULT_PRICE_FEED_URL);
    }

    #[test]
    fn test_builder_overrides() {
        let client = P2pClient::builder()
            .base_url("http://localhost:8080/api/")
            .price_feed_url("http://localhost:8081/price")
            .signer(Arc::new(Fixed))
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), "http://localhost:8080/api");
        assert_eq!(client.feed.url(), "http://localhost:8081/price");
    }

    #[test]
    fn test_from_env_overrides_and_blank_fallback() {
        std::env::set_var(network::API_URL_ENV, "http://localhost:9000/api");
        std::env::set_var(network::PRICE_FEED_URL_ENV, " http://localhost:9001/price ");
        let client = P2pClientBuilder::from_env()
            .signer(Arc::new(Fixed))
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), "http://localhost:9000/api");
        assert_eq!(client.feed.url(), "http://localhost:9001/price");

        std::env::set_var(network::API_URL_ENV, "   ");
        std::env::set_var(network::PRICE_FEED_URL_ENV, "");
        let client = P2pClientBuilder::from_env()
            .signer(Arc::new(Fixed))
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), network::DEFAULT_API_URL);
        assert_eq!(client.feed.url(), network::DEFAULT_PRICE_FEED_URL);

        std::env::remove_var(network::API_URL_ENV);
        std::env::remove_var(network::PRICE_FEED_URL_ENV);
        let client = P2pClientBuilder::from_env()
            .signer(Arc::new(Fixed))
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), network::DEFAULT_API_URL);
    }

    #[test]
    fn test_start_feed_without_runtime_stays_pending() {
        let client = P2pClient::builder()
            .price_feed_url("http://127.0.0.1:9/price")
            .signer(Arc::new(Fixed))
            .start_feed(true)
            .build()
            .unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let state = runtime.block_on(client.rates().snapshot());
        assert_eq!(state.status, crate::domain::rate::FeedStatus::Pending);
    }

    #[tokio::test]
    async fn test_new_client_has_empty_state() {
        let client = P2pClient::builder().signer(Arc::new(Fixed)).build().unwrap();
        assert!(client.orders().served().await.is_empty());
        assert!(client.rates().current().await.is_zero());
        client.clear().await;
        assert!(client.payments.is_empty().await);
    }
}
