//! Integration tests for the bucket service endpoints

mod common;

use bucket_client::{ApiError, BucketApi, BucketClient, KeyPair, UploadFile};
use mockito::Matcher;
use uuid::Uuid;

fn bucket(server: &mockito::Server, token: Option<&str>) -> BucketClient {
    BucketClient::new(server.url(), common::client_with_token(token))
}

#[tokio::test]
async fn test_issue_key_is_unauthenticated() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/key")
        .match_header("authorization", Matcher::Missing)
        .with_header("content-type", "application/json")
        .with_body(r#"{"keyId":"195ea586-110f-454a-a7e6-87bbec64c41c","key":"ee014d6f-5798-4bcb-a5e4-1a4d36e8fa0b"}"#)
        .create_async()
        .await;

    let pair = bucket(&server, Some("ignored")).issue_key().await.unwrap();
    assert_eq!(
        pair,
        KeyPair::new(
            "195ea586-110f-454a-a7e6-87bbec64c41c",
            "ee014d6f-5798-4bcb-a5e4-1a4d36e8fa0b"
        )
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_sends_multipart_with_credential() {
    let mut server = mockito::Server::new_async().await;
    let id = Uuid::new_v4();
    let mock = server
        .mock("POST", "/upload")
        .match_header("authorization", "Basic aWQ6a2V5")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="files"; filename="cat.png""#.to_string()),
            Matcher::Regex("meow".to_string()),
        ]))
        .with_body(format!(r#"["{id}"]"#))
        .create_async()
        .await;

    let ids = bucket(&server, Some("aWQ6a2V5"))
        .upload(vec![UploadFile::new("cat.png", b"meow".to_vec())])
        .await
        .unwrap();

    assert_eq!(ids, vec![id]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_rejection_carries_error_info() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload")
        .with_status(400)
        .with_body(r#"{"errorInfo":"Invalid request Missing `:` delimiter"}"#)
        .create_async()
        .await;

    let err = bucket(&server, Some("bad"))
        .upload(vec![UploadFile::new("a.png", vec![1, 2, 3])])
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected(message) => assert_eq!(message, "Invalid request Missing `:` delimiter"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_download_returns_bytes() {
    let mut server = mockito::Server::new_async().await;
    let id = Uuid::new_v4();
    let mock = server
        .mock("GET", format!("/download/{id}").as_str())
        .match_header("authorization", "Basic tok")
        .with_body(vec![0x89, b'P', b'N', b'G'])
        .create_async()
        .await;

    let bytes = bucket(&server, Some("tok")).download(id).await.unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_download_unknown_file_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let id = Uuid::new_v4();
    let _mock = server
        .mock("GET", format!("/download/{id}").as_str())
        .with_status(204)
        .create_async()
        .await;

    let err = bucket(&server, Some("tok")).download(id).await.unwrap_err();
    assert!(matches!(err, ApiError::FileNotFound(ref file) if *file == id.to_string()));
}

#[tokio::test]
async fn test_server_error_maps_to_server_variant() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/key")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = bucket(&server, None).issue_key().await.unwrap_err();
    assert!(matches!(err, ApiError::Server(_, ref message) if message == "boom"));
}
