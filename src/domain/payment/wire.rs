//! Wire types for payment confirmation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{PaymentEntry, ProofFile};

/// Body of `POST /orders/{id}/confirm`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentBody {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub pkoin_amount: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub fiat_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<ProofUpload>,
}

/// Proof file encoded for a JSON body.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProofUpload {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Standard base64 of the file bytes.
    pub content: String,
}

impl From<&ProofFile> for ProofUpload {
    fn from(file: &ProofFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            content: STANDARD.encode(&file.bytes),
        }
    }
}

impl From<&PaymentEntry> for ConfirmPaymentBody {
    fn from(entry: &PaymentEntry) -> Self {
        Self {
            pkoin_amount: entry.amounts.map(|a| a.pkoin),
            fiat_amount: entry.amounts.map(|a| a.fiat),
            proof: entry.proof.as_ref().map(|p| ProofUpload::from(&p.file)),
        }
    }
}
