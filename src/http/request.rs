//! Per-call request description for [`SignedTransport::fetch`].
//!
//! [`SignedTransport::fetch`]: crate::http::SignedTransport::fetch

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;

use crate::error::SdkError;

/// Request body: a raw string sent as-is, or a structured value sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Json(serde_json::Value),
}

/// Caller-supplied options merged into the outgoing request.
///
/// Headers here never replace the `Signature` header.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

/// Method, body and options for one signed call.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub data: Option<RequestBody>,
    pub options: RequestOptions,
}

impl RequestConfig {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            data: None,
            options: RequestOptions::default(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, SdkError> {
        self.data = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Send `body` verbatim.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.data = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.options.headers = headers;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.query.push((key.into(), value.into()));
        self
    }
}
