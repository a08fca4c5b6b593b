//! HTTP layer — `SignedTransport` and its request types.

pub mod client;
pub mod request;

pub use client::SignedTransport;
pub use request::{RequestBody, RequestConfig, RequestOptions};
pub use reqwest::Method;
