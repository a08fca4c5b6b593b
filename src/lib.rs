//! # PKOIN P2P SDK
//!
//! Non-visual core of a peer-to-peer PKOIN trading client: a signed API
//! transport, the order lifecycle with its payment-step workflow, and pricing
//! derived from maker margins and a live exchange rate.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, hex codec, pricing, domain models (no I/O)
//! 2. **Auth** — `Signature` and the external `SigningGateway`
//! 3. **HTTP API** — `SignedTransport`, one fresh signature per request
//! 4. **High-Level Client** — `P2pClient` with nested sub-clients and the price feed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pkoin_p2p_sdk::prelude::*;
//!
//! // Inside a tokio runtime; `start_feed` fetches the rate once in the background.
//! let client = P2pClient::builder()
//!     .signer(Arc::new(my_wallet))
//!     .start_feed(true)
//!     .build()?;
//!
//! client.orders().refresh().await?;
//! let order_id = OrderId::from("ord_1");
//! client.payments().init_buy(&order_id).await;
//! client.payments().next_step(&order_id).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, hex codec, pricing and formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Request signatures and the signing gateway.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Signed HTTP transport.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `P2pClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + pricing
    pub use crate::shared::{
        hex_encode, order_bounds, round2, unit_price, Address, OrderBounds, OrderId,
        QuoteCurrency,
    };

    // Domain types — order
    pub use crate::domain::order::{Order, OrderStatus, OrderView, ServedOrders};

    // Domain types — payment
    pub use crate::domain::payment::{
        Amounts, AttachedProof, PaymentEntry, PaymentStep, PaymentSteps, ProofFile,
    };

    // Domain types — offer, rate
    pub use crate::domain::offer::{MakerOffer, OfferDetail, OfferQuote, OfferView};
    pub use crate::domain::rate::{ExchangeRate, FeedState, FeedStatus};

    // Errors
    pub use crate::error::{CodecError, HttpError, PaymentError, SdkError, SigningError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_PRICE_FEED_URL};

    // Auth
    pub use crate::auth::{Signature, SigningGateway, AUTH_SCOPE};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        OffersClient, OrdersClient, P2pClient, P2pClientBuilder, PaymentsClient, RatesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::domain::rate::PriceFeed;
    #[cfg(feature = "http")]
    pub use crate::http::{RequestBody, RequestConfig, RequestOptions, SignedTransport};
}
