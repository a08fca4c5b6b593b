//! Signed HTTP transport — `SignedTransport`.
//!
//! Every call obtains a fresh signature for the `"auth"` scope, renders it
//! into the `Signature` header and returns only the decoded response body.
//! No retries and no default timeout: both are caller policy. Pass a
//! preconfigured `reqwest::Client` to [`SignedTransport::with_client`] to set
//! one.

use crate::auth::{SigningGateway, AUTH_SCOPE};
use crate::error::{HttpError, SdkError};
use crate::http::request::{RequestBody, RequestConfig};

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const SIGNATURE: HeaderName = HeaderName::from_static("signature");

/// HTTP client for the P2P REST API that signs every request.
pub struct SignedTransport {
    base_url: String,
    client: Client,
    signer: Arc<dyn SigningGateway>,
}

impl SignedTransport {
    pub fn new(base_url: &str, signer: Arc<dyn SigningGateway>) -> Result<Self, SdkError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .pool_idle_timeout(Duration::from_secs(90))
                .pool_max_idle_per_host(10);
        }
        let client = builder.build().map_err(HttpError::from)?;
        Ok(Self::with_client(base_url, client, signer))
    }

    /// Use a caller-built client (timeouts, proxies, TLS roots).
    pub fn with_client(base_url: &str, client: Client, signer: Arc<dyn SigningGateway>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            signer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a signed request to `base_url + path` and decode the response body.
    ///
    /// Signing happens first; if it fails no request is sent. Non-success
    /// statuses are returned as [`HttpError`] without recovery.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        config: RequestConfig,
    ) -> Result<T, SdkError> {
        let signature = self.signature_header().await?;

        let RequestConfig {
            method,
            data,
            options,
        } = config;

        let mut headers = options.headers;
        headers.insert(SIGNATURE, signature);

        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Dispatching signed request");

        let mut req = self.client.request(method, &url).headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        match data {
            Some(RequestBody::Json(value)) => req = req.json(&value),
            Some(RequestBody::Text(text)) => {
                req = req
                    .header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))
                    .body(text)
            }
            None => {}
        }

        let resp = req.send().await.map_err(HttpError::from)?;
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await.map_err(HttpError::from)?;
            let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
            return Ok(serde_json::from_slice(body)?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status_code, url = %url, "Signed request failed");

        Err(match status_code {
            401 | 403 => HttpError::Unauthorized(body_text),
            404 => HttpError::NotFound(body_text),
            429 => HttpError::RateLimited,
            400..=499 => HttpError::BadRequest {
                status: status_code,
                body: body_text,
            },
            _ => HttpError::ServerError {
                status: status_code,
                body: body_text,
            },
        }
        .into())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        self.fetch(path, RequestConfig::get()).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SdkError> {
        self.fetch(path, RequestConfig::new(Method::POST).json(body)?)
            .await
    }

    async fn signature_header(&self) -> Result<HeaderValue, SdkError> {
        let signature = self.signer.sign(AUTH_SCOPE).await?;
        let rendered = signature.header_value()?;
        HeaderValue::from_str(&rendered)
            .map_err(|e| HttpError::InvalidHeader(format!("Signature: {}", e)).into())
    }
}

impl Clone for SignedTransport {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            signer: self.signer.clone(),
        }
    }
}

impl std::fmt::Debug for SignedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Signature;
    use crate::error::SigningError;
    use async_trait::async_trait;

    struct Refusing;

    #[async_trait]
    impl SigningGateway for Refusing {
        async fn sign(&self, scope: &str) -> Result<Signature, SigningError> {
            Err(SigningError::Rejected {
                scope: scope.to_string(),
                reason: "user declined".to_string(),
            })
        }
    }

    fn transport(base_url: &str) -> SignedTransport {
        SignedTransport::with_client(base_url, Client::new(), Arc::new(Refusing))
    }

    #[test]
    fn test_url_joins_single_slash() {
        let t = transport("https://api.example.com/v1/");
        assert_eq!(t.base_url(), "https://api.example.com/v1");
        assert_eq!(t.url("/orders"), "https://api.example.com/v1/orders");
        assert_eq!(t.url("orders/1"), "https://api.example.com/v1/orders/1");
    }

    #[tokio::test]
    async fn test_signing_failure_aborts_before_network() {
        // Nothing listens on port 9; reaching the network would yield an HTTP error.
        let t = transport("http://127.0.0.1:9");
        let err = t.get::<serde_json::Value>("/orders").await.unwrap_err();
        assert!(
            matches!(err, SdkError::Signing(SigningError::Rejected { ref scope, .. }) if scope == "auth"),
            "unexpected error: {err:?}"
        );
    }
}
