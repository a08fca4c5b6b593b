//! Unified SDK error types.

use thiserror::Error;

use crate::domain::payment::PaymentStep;
use crate::shared::OrderId;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request ({status}): {body}")]
    BadRequest { status: u16, body: String },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Failures of the external signing gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigningError {
    #[error("Signer unavailable: {0}")]
    Unavailable(String),

    #[error("Signing rejected for scope `{scope}`: {reason}")]
    Rejected { scope: String, reason: String },

    #[error("Signature cannot be rendered: {0}")]
    Malformed(String),
}

/// Payment-step workflow violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("Payment for order {0} has not been started")]
    NotStarted(OrderId),

    #[error("Payment for order {0} is already confirmed")]
    AlreadyConfirmed(OrderId),

    #[error("Order {order_id} has no step after {step}")]
    NoNextStep { order_id: OrderId, step: PaymentStep },
}

/// Hex codec input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Character {ch:?} at position {index} does not fit in one byte after normalization")]
    OutOfRange { ch: char, index: usize },
}
