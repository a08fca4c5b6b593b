//! Payment domain — the buyer's step-by-step payment workflow for one order.
//!
//! ```text
//! Amount (1) ──next──▶ Transfer (2) ──next──▶ Proof (3) ──confirm──▶ Confirmed (4)
//! ```
//!
//! `next_step` on an order that was never started behaves as if it started
//! at `Amount`, so the first call lands on `Transfer`. `Confirmed` is reached
//! only through a successful confirmation call and is final.

#[cfg(feature = "http")]
pub mod client;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::PaymentSteps;

// ─── PaymentStep ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStep {
    /// Buyer chooses how much PKOIN to buy.
    Amount,
    /// Buyer sends fiat following the maker's instructions.
    Transfer,
    /// Buyer attaches a receipt.
    Proof,
    /// Payment confirmed to the backend.
    Confirmed,
}

impl PaymentStep {
    pub const FIRST: PaymentStep = PaymentStep::Amount;

    /// 1-based position shown in the UI.
    pub fn number(&self) -> u8 {
        match self {
            Self::Amount => 1,
            Self::Transfer => 2,
            Self::Proof => 3,
            Self::Confirmed => 4,
        }
    }

    /// Step reached by `next_step`. `Proof` and `Confirmed` have none.
    pub fn next(&self) -> Option<PaymentStep> {
        match self {
            Self::Amount => Some(Self::Transfer),
            Self::Transfer => Some(Self::Proof),
            Self::Proof | Self::Confirmed => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Transfer => "transfer",
            Self::Proof => "proof",
            Self::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Amounts / proof ─────────────────────────────────────────────────────────

/// Amounts the buyer entered for an order.
///
/// Serialized as JSON numbers, like every amount the API exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    #[serde(rename = "pkoinAmount", with = "rust_decimal::serde::float")]
    pub pkoin: Decimal,
    #[serde(rename = "fiatAmount", with = "rust_decimal::serde::float")]
    pub fiat: Decimal,
}

/// A proof-of-payment file selected by the buyer.
#[derive(Clone, PartialEq, Eq)]
pub struct ProofFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ProofFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for ProofFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The proof currently attached to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedProof {
    pub file: ProofFile,
    pub attached_at: DateTime<Utc>,
}

// ─── PaymentEntry ────────────────────────────────────────────────────────────

/// Per-order payment record, created when the buyer starts paying and
/// dropped when the order leaves the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEntry {
    pub step: PaymentStep,
    pub amounts: Option<Amounts>,
    pub proof: Option<AttachedProof>,
}

impl PaymentEntry {
    pub(crate) fn started() -> Self {
        Self {
            step: PaymentStep::FIRST,
            amounts: None,
            proof: None,
        }
    }
}
