//! Network URL constants for the PKOIN P2P SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://p2p.pkoin.net/api";

/// Default public quote endpoint for the PKOIN exchange rate.
pub const DEFAULT_PRICE_FEED_URL: &str =
    "https://min-api.cryptocompare.com/data/price?fsym=PKOIN&tsyms=USD,RUB";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "PKOIN_P2P_API_URL";

/// Environment variable overriding [`DEFAULT_PRICE_FEED_URL`].
pub const PRICE_FEED_URL_ENV: &str = "PKOIN_P2P_PRICE_FEED_URL";
