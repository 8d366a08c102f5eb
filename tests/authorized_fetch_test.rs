//! Integration tests for Authorized Fetch against a mock server

mod common;

use std::sync::Arc;

use bucket_client::{
    AuthorizedClient, CredentialStore, FetchError, KeyPair, KeyPairCodec, MemorySlotStorage,
    RawTokenCodec, RequestOptions,
};
use mockito::Matcher;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};

#[tokio::test]
async fn test_injects_header_with_default_method_and_no_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files")
        .match_header("authorization", "Basic abc")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let response = common::client_with_token(Some("abc"))
        .fetch(format!("{}/files", server.url()), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_each_call_reads_the_current_credential() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/")
        .match_header("authorization", "Basic A")
        .create_async()
        .await;
    let second = server
        .mock("GET", "/")
        .match_header("authorization", "Basic B")
        .create_async()
        .await;

    let store = CredentialStore::load(Arc::new(MemorySlotStorage::new()), "auth-key", RawTokenCodec);
    let client = AuthorizedClient::new(reqwest::Client::new(), Arc::new(store.clone()));

    store.set(Some("A".to_string())).unwrap();
    client.fetch(server.url(), RequestOptions::new()).await.unwrap();
    store.set(Some("B".to_string())).unwrap();
    client.fetch(server.url(), RequestOptions::new()).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_key_pair_credential_is_base64_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/download/1")
        .match_header("authorization", "Basic aWQ6a2V5")
        .create_async()
        .await;

    let store = CredentialStore::load(Arc::new(MemorySlotStorage::new()), "auth-key", KeyPairCodec::new());
    store.set(Some(KeyPair::new("id", "key"))).unwrap();
    let client = AuthorizedClient::new(reqwest::Client::new(), Arc::new(store));

    client
        .fetch(format!("{}/download/1", server.url()), RequestOptions::new())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_headers_do_not_drop_authorization() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("authorization", "Basic abc")
        .match_header("x", "1")
        .match_body("payload")
        .create_async()
        .await;

    let options = RequestOptions::new()
        .method(Method::POST)
        .header(HeaderName::from_static("x"), HeaderValue::from_static("1"))
        .body(bucket_client::RequestBody::Text("payload".to_string()));
    common::client_with_token(Some("abc"))
        .fetch(format!("{}/upload", server.url()), options)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_authorization_overrides_stored_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("authorization", "Bearer mine")
        .create_async()
        .await;

    let options = RequestOptions::new().header(AUTHORIZATION, HeaderValue::from_static("Bearer mine"));
    common::client_with_token(Some("abc"))
        .fetch(server.url(), options)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_statuses_are_returned_untranslated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/upload")
        .with_status(400)
        .with_body(r#"{"errorInfo":"Invalid request"}"#)
        .create_async()
        .await;

    let response = common::client_with_token(None)
        .fetch(format!("{}/upload", server.url()), RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_credential_guard_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/").expect(0).create_async().await;

    let result = common::client_with_token(None)
        .require_credential(true)
        .fetch(server.url(), RequestOptions::new())
        .await;

    assert!(matches!(result, Err(FetchError::MissingCredential)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    // The listener is dropped, so nothing accepts on this port.
    let result = common::client_with_token(Some("abc"))
        .fetch(format!("http://{addr}/"), RequestOptions::new())
        .await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}
