//! Authentication — signatures and the external signing gateway.
//!
//! ## Security Model
//!
//! - Keys never enter the SDK. Every signed request asks the embedding
//!   application's [`SigningGateway`] (wallet, enclave, remote signer) for a
//!   fresh [`Signature`] over the `"auth"` scope.
//! - Signatures are not cached: one request, one `sign` call.
//! - The signature is rendered as JSON into the `Signature` header and is
//!   always set after caller headers, so callers cannot replace it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SigningError;

/// Scope requested for API authentication.
pub const AUTH_SCOPE: &str = "auth";

/// Header carrying the JSON-rendered signature.
pub const SIGNATURE_HEADER: &str = "Signature";

// ============================================================================
// Signature
// ============================================================================

/// Opaque signature object produced by a [`SigningGateway`].
///
/// The SDK never inspects the contents; it only renders them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(serde_json::Value);

impl Signature {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Canonical JSON string placed in the `Signature` header.
    pub fn header_value(&self) -> Result<String, SigningError> {
        if self.0.is_null() {
            return Err(SigningError::Malformed("signature is null".to_string()));
        }
        serde_json::to_string(&self.0).map_err(|e| SigningError::Malformed(e.to_string()))
    }
}

impl From<serde_json::Value> for Signature {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

// ============================================================================
// SigningGateway
// ============================================================================

/// External signer consumed by the signed transport.
///
/// Implementations may suspend (hardware key, remote attestation) and must be
/// safe to call concurrently.
#[async_trait]
pub trait SigningGateway: Send + Sync {
    /// Produce a signature for `scope`.
    async fn sign(&self, scope: &str) -> Result<Signature, SigningError>;
}

#[async_trait]
impl<T: SigningGateway + ?Sized> SigningGateway for Arc<T> {
    async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
        (**self).sign(scope).await
    }
}

#[async_trait]
impl<T: SigningGateway + ?Sized> SigningGateway for Box<T> {
    async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
        (**self).sign(scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_value_is_compact_json() {
        let sig = Signature::new(json!({"signature": "3045", "pubkey": "02ab", "nonce": 7}));
        assert_eq!(
            sig.header_value().unwrap(),
            r#"{"signature":"3045","pubkey":"02ab","nonce":7}"#
        );
    }

    #[test]
    fn test_header_value_keeps_gateway_field_order() {
        let sig: Signature = serde_json::from_str(r#"{"z":1,"a":2}"#).unwrap();
        assert_eq!(sig.header_value().unwrap(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_null_signature_rejected() {
        let sig = Signature::new(serde_json::Value::Null);
        assert!(matches!(sig.header_value(), Err(SigningError::Malformed(_))));
    }

    struct Fixed;

    #[async_trait]
    impl SigningGateway for Fixed {
        async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
            Ok(Signature::new(json!({ "scope": scope })))
        }
    }

    #[tokio::test]
    async fn test_arc_gateway_delegates() {
        let gateway: Arc<dyn SigningGateway> = Arc::new(Fixed);
        let sig = gateway.sign(AUTH_SCOPE).await.unwrap();
        assert_eq!(sig.as_value()["scope"], "auth");
    }
}
