//! Tests for `ReqwestClient`.
//!
//! Only construction and failure classification are covered here; real
//! requests against a live echo service are left to manual runs.

use super::{HttpClient, HttpError, HttpRequest, ReqwestClient};

#[test]
fn default_creates_same_as_new() {
    let client1 = ReqwestClient::new();
    let client2 = ReqwestClient::default();

    assert!(format!("{client1:?}").contains("ReqwestClient"));
    assert!(format!("{client2:?}").contains("ReqwestClient"));
}

#[test]
fn from_client_accepts_custom_client() {
    let custom = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap();
    let client = ReqwestClient::from_client(custom);

    let _ = format!("{client:?}");
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}

#[tokio::test]
async fn request_to_invalid_host_returns_error_or_proxy_response() {
    let client = ReqwestClient::new();
    let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

    let result = client.request(HttpRequest::get(url)).await;

    // A proxy in the environment may answer with an error status instead.
    match result {
        Err(HttpError::Connection(_) | HttpError::Timeout) => {}
        Ok(resp) if !resp.is_success() => {}
        other => panic!("Expected connection error or proxy error response, got {other:?}"),
    }
}
