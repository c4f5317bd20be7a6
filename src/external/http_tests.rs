//! Tests for HTTP request/response types.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

mod http_request {
    use super::*;

    #[test]
    fn get_creates_get_request_without_headers() {
        let url = url::Url::parse("https://api.ipify.org/").unwrap();
        let req = HttpRequest::get(url.clone());

        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::get(url)
            .with_header(http::header::ACCEPT, http::HeaderValue::from_static("text/plain"))
            .with_header(http::header::ACCEPT, http::HeaderValue::from_static("*/*"));

        let values: Vec<_> = req.headers.get_all(http::header::ACCEPT).iter().collect();
        assert_eq!(values.len(), 2);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn ok_sets_status_and_body() {
        let resp = HttpResponse::ok("203.0.113.5");

        assert_eq!(resp.status, http::StatusCode::OK);
        assert_eq!(resp.body, b"203.0.113.5");
        assert!(resp.is_success());
    }

    #[test]
    fn is_success_returns_false_for_non_2xx() {
        for status in [
            http::StatusCode::MOVED_PERMANENTLY,
            http::StatusCode::NOT_FOUND,
            http::StatusCode::BAD_GATEWAY,
        ] {
            assert!(!HttpResponse::new(status, Vec::new()).is_success());
        }
    }

    #[test]
    fn body_text_replaces_invalid_utf8() {
        let resp = HttpResponse::ok(vec![b'1', 0xFF, b'2']);

        assert_eq!(resp.body_text(), "1\u{FFFD}2");
    }

    #[test]
    fn body_text_is_empty_for_empty_body() {
        assert_eq!(HttpResponse::ok(Vec::new()).body_text(), "");
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = HttpError::Connection(Box::new(io_err));

        assert!(err.to_string().contains("refused"));
        assert!(err.source().is_some());
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn invalid_url_displays_message() {
        let err = HttpError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl HttpClient for CountingClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::ok("198.51.100.7"))
        }
    }

    #[tokio::test]
    async fn mock_client_returns_response_and_counts_calls() {
        let client = CountingClient {
            calls: AtomicUsize::new(0),
        };
        let url = url::Url::parse("https://example.com/").unwrap();

        let resp = client.request(HttpRequest::get(url)).await.unwrap();

        assert_eq!(resp.body_text(), "198.51.100.7");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }
}
