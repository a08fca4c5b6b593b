//! Test signer shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pkoin_p2p_sdk::auth::{Signature, SigningGateway};
use pkoin_p2p_sdk::client::P2pClient;
use pkoin_p2p_sdk::error::SigningError;
use serde_json::json;

/// Signs with an increasing nonce so each signature is distinguishable.
#[derive(Default)]
pub struct CountingSigner {
    calls: AtomicUsize,
}

impl CountingSigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Header value produced by the `n`-th call of [`CountingSigner`].
pub fn signature_json(n: usize) -> String {
    format!(r#"{{"scope":"auth","nonce":{n}}}"#)
}

#[async_trait]
impl SigningGateway for CountingSigner {
    async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Signature::new(json!({ "scope": scope, "nonce": n })))
    }
}

/// Always refuses to sign.
pub struct RefusingSigner;

#[async_trait]
impl SigningGateway for RefusingSigner {
    async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
        Err(SigningError::Rejected {
            scope: scope.to_string(),
            reason: "wallet locked".to_string(),
        })
    }
}

pub fn client(api_url: &str, feed_url: &str, signer: Arc<dyn SigningGateway>) -> P2pClient {
    P2pClient::builder()
        .base_url(api_url)
        .price_feed_url(feed_url)
        .signer(signer)
        .build()
        .expect("client should build")
}

pub fn order_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "unitPrice": 99,
        "currency": "RUB",
        "fiatCurrency": "RUB",
        "fiatPrice": 4950,
        "paymentMethod": "Bank transfer",
        "counterpartyAddress": "PQxuDLBaetWEq9Wcx33VjhRfqtof1o8hDz",
        "status": status,
        "paymentProof": null
    })
}
