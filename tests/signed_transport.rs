//! Signed transport against a local mock API.

mod common;

use std::sync::Arc;

use httpmock::prelude::*;
use pkoin_p2p_sdk::error::{HttpError, SdkError, SigningError};
use pkoin_p2p_sdk::http::{RequestConfig, SignedTransport};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

use common::{signature_json, CountingSigner, RefusingSigner};

fn transport(server: &MockServer, signer: Arc<CountingSigner>) -> SignedTransport {
    SignedTransport::with_client(&server.base_url(), reqwest::Client::new(), signer)
}

#[tokio::test]
async fn test_every_request_carries_signature() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/orders")
                .header("Signature", signature_json(1));
            then.status(200).json_body(json!([]));
        })
        .await;

    let signer = Arc::new(CountingSigner::default());
    let body: Value = transport(&server, signer.clone())
        .get("/orders")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, json!([]));
    assert_eq!(signer.calls(), 1);
}

#[tokio::test]
async fn test_fresh_signature_per_call() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/offers").header("Signature", signature_json(1));
            then.status(200).json_body(json!({"call": 1}));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/offers").header("Signature", signature_json(2));
            then.status(200).json_body(json!({"call": 2}));
        })
        .await;

    let signer = Arc::new(CountingSigner::default());
    let t = transport(&server, signer.clone());
    let a: Value = t.get("/offers").await.unwrap();
    let b: Value = t.get("/offers").await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(a["call"], 1);
    assert_eq!(b["call"], 2);
    assert_eq!(signer.calls(), 2);
}

#[tokio::test]
async fn test_caller_signature_header_is_overridden() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/orders").header("Signature", signature_json(1));
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("signature", HeaderValue::from_static("forged"));
    headers.insert("x-client", HeaderValue::from_static("table"));

    let t = transport(&server, Arc::new(CountingSigner::default()));
    let _: Value = t
        .fetch("/orders", RequestConfig::get().headers(headers))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_headers_and_query_are_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/orders")
                .query_param("status", "pending")
                .header("X-Client", "table")
                .header_exists("Signature");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-client", HeaderValue::from_static("table"));

    let t = transport(&server, Arc::new(CountingSigner::default()));
    let _: Value = t
        .fetch(
            "/orders",
            RequestConfig::get().headers(headers).query("status", "pending"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_json_and_text_bodies() {
    let server = MockServer::start_async().await;
    let json_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/json")
                .json_body(json!({"pkoinAmount": 50}));
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;
    let text_mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/text").body("plain payload");
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let t = transport(&server, Arc::new(CountingSigner::default()));
    let a: Value = t
        .post("/json", &json!({"pkoinAmount": 50}))
        .await
        .unwrap();
    let b: Value = t
        .fetch("/text", RequestConfig::put().text("plain payload"))
        .await
        .unwrap();

    json_mock.assert_async().await;
    text_mock.assert_async().await;
    assert_eq!(a["ok"], true);
    assert_eq!(b["ok"], true);
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_unit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/orders/o1");
            then.status(204);
        })
        .await;

    let t = transport(&server, Arc::new(CountingSigner::default()));
    let out: Option<Value> = t.fetch("/orders/o1", RequestConfig::delete()).await.unwrap();
    assert_eq!(out, None);
}

#[tokio::test]
async fn test_status_errors_are_classified() {
    let server = MockServer::start_async().await;
    for (path, status) in [("/401", 401), ("/404", 404), ("/429", 429), ("/422", 422), ("/500", 500)] {
        server
            .mock_async(move |when, then| {
                when.path(path);
                then.status(status).body("nope");
            })
            .await;
    }

    let t = transport(&server, Arc::new(CountingSigner::default()));
    let err = |e: SdkError| match e {
        SdkError::Http(h) => h,
        other => panic!("expected HTTP error, got {other:?}"),
    };

    assert!(matches!(
        err(t.get::<Value>("/401").await.unwrap_err()),
        HttpError::Unauthorized(_)
    ));
    assert!(matches!(
        err(t.get::<Value>("/404").await.unwrap_err()),
        HttpError::NotFound(_)
    ));
    assert!(matches!(
        err(t.get::<Value>("/429").await.unwrap_err()),
        HttpError::RateLimited
    ));
    assert!(matches!(
        err(t.get::<Value>("/422").await.unwrap_err()),
        HttpError::BadRequest { status: 422, .. }
    ));
    assert!(matches!(
        err(t.get::<Value>("/500").await.unwrap_err()),
        HttpError::ServerError { status: 500, ref body } if body == "nope"
    ));
}

#[tokio::test]
async fn test_failed_signing_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/orders");
            then.status(200).json_body(json!([]));
        })
        .await;

    let t = SignedTransport::with_client(
        &server.base_url(),
        reqwest::Client::new(),
        Arc::new(RefusingSigner),
    );
    let err = t.get::<Value>("/orders").await.unwrap_err();

    assert!(matches!(err, SdkError::Signing(SigningError::Rejected { .. })));
    assert_eq!(mock.hits_async().await, 0);
}
