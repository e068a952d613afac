//! Upload client tests against a mock profiling backend.

#![cfg(feature = "client")]

use std::time::Duration;

use mockito::Matcher;
use profile_lens::client::{ClientConfig, ProfilerClient};
use profile_lens::error::ProfileError;
use profile_lens::session::{Completion, ProfileSession, SessionState};

const PROFILE_BODY: &str = r#"{
  "shape": [3, 2],
  "columns": ["x", "label"],
  "data_types": {"x": "int64", "label": "object"},
  "null_values": {"x": 0, "label": 1},
  "null_rate": {"x": 0.0, "label": 0.3333333333333333},
  "basic_stats": {
    "x": {"count": 3.0, "mean": 2.0, "std": 1.0, "min": 1.0, "25%": 1.5,
          "50%": 2.0, "75%": 2.5, "max": 3.0},
    "label": {"count": 2.0, "unique": 2.0, "top": "red", "freq": 1.0}
  },
  "skewness": {"x": 0.0},
  "kurtosis": {"x": null},
  "histogram": {"x": {"bins": [1.0, 2.0, 3.0], "counts": [1, 2]}}
}"#;

const CSV_PAYLOAD: &[u8] = b"x,label\n1,red\n2,\n3,blue\n";

fn client_for(server: &mockito::ServerGuard) -> ProfilerClient {
    let config = ClientConfig::default()
        .with_endpoint(format!("{}/upload/", server.url()))
        .with_timeout(Duration::from_secs(5));
    ProfilerClient::new(config).unwrap()
}

#[tokio::test]
async fn test_upload_returns_profile() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload/")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::Regex(r#"name="file"; filename="data.csv""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let profile = client
        .upload_bytes("data.csv".to_string(), CSV_PAYLOAD.to_vec())
        .await
        .unwrap();

    assert_eq!(profile.columns, vec!["x", "label"]);
    assert_eq!(profile.row_count(), 3);
    assert_eq!(profile.null_count("label"), 1);
    assert_eq!(profile.histogram("x").unwrap().counts, vec![1, 2]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_file_from_disk() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload/")
        .match_body(Matcher::Regex(r#"filename="orders.csv""#.to_string()))
        .with_status(200)
        .with_body(PROFILE_BODY)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.csv");
    std::fs::write(&path, CSV_PAYLOAD).unwrap();

    let profile = client_for(&server).upload_file(&path).await.unwrap();
    assert_eq!(profile.columns.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_error_body_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload/")
        .with_status(200)
        .with_body(r#"{"error": "Unsupported file type"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .upload_bytes("data.txt".to_string(), b"hello".to_vec())
        .await
        .unwrap_err();
    match err {
        ProfileError::Backend { message } => assert_eq!(message, "Unsupported file type"),
        other => panic!("Expected Backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload/")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = client_for(&server)
        .upload_bytes("data.csv".to_string(), CSV_PAYLOAD.to_vec())
        .await
        .unwrap_err();
    match err {
        ProfileError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_file_is_io_context_error() {
    let server = mockito::Server::new_async().await;
    let err = client_for(&server)
        .upload_file(std::path::Path::new("/definitely/not/here.csv"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.csv"));
}

#[tokio::test]
async fn test_session_keeps_only_latest_upload() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload/")
        .with_status(200)
        .with_body(PROFILE_BODY)
        .expect(2)
        .create_async()
        .await;
    let client = client_for(&server);

    let mut session = ProfileSession::new();
    let first = session.begin_upload();
    let second = session.begin_upload();

    let newer = client
        .upload_bytes("b.csv".to_string(), CSV_PAYLOAD.to_vec())
        .await;
    let older = client
        .upload_bytes("a.csv".to_string(), CSV_PAYLOAD.to_vec())
        .await;

    assert_eq!(session.complete(second, newer), Completion::Accepted);
    assert_eq!(session.complete(first, older), Completion::Stale);
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.view().rows.len(), 2);
}

#[tokio::test]
async fn test_failed_upload_clears_session() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload/")
        .with_status(502)
        .create_async()
        .await;

    let mut session = ProfileSession::new();
    let ticket = session.begin_upload();
    let outcome = client_for(&server)
        .upload_bytes("data.csv".to_string(), CSV_PAYLOAD.to_vec())
        .await;
    assert!(outcome.as_ref().is_err_and(ProfileError::is_retryable));

    session.complete(ticket, outcome);
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.view().is_empty());
}
