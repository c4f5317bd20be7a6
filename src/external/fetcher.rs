//! External (public) IP lookup with a timeout race.

use std::fmt;
use std::time::Duration;

use http::header::{ACCEPT, HeaderValue};
use serde::Serialize;

use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Outcome of the external IP lookup.
///
/// The four variants are rendered differently, so they must not be
/// collapsed into a single "unavailable" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum ExternalIpResult {
    /// The echo service returned a non-empty body (trimmed).
    Resolved(String),
    /// The timeout elapsed before the request completed.
    TimedOut,
    /// The request failed before the timeout elapsed.
    NetworkError,
    /// The request succeeded but the body was empty or whitespace-only.
    EmptyResponse,
}

impl ExternalIpResult {
    /// Classifies a completed request.
    #[must_use]
    pub fn from_response(outcome: Result<HttpResponse, HttpError>) -> Self {
        match outcome {
            Ok(response) if response.is_success() => {
                let body = response.body_text();
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    Self::EmptyResponse
                } else {
                    Self::Resolved(trimmed.to_string())
                }
            }
            Ok(response) => {
                tracing::debug!("External IP service answered {}", response.status);
                Self::NetworkError
            }
            Err(HttpError::Timeout) => Self::TimedOut,
            Err(e) => {
                tracing::debug!("External IP request failed: {e}");
                Self::NetworkError
            }
        }
    }
}

impl fmt::Display for ExternalIpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(address) => write!(f, "{address}"),
            Self::TimedOut => write!(f, "Timeout (no network?)"),
            Self::NetworkError => write!(f, "Unavailable (no network or server down)"),
            Self::EmptyResponse => write!(f, "Unavailable"),
        }
    }
}

/// One-shot external IP lookup against a public echo service.
///
/// The request and a timer race; whichever finishes first decides the
/// outcome. The losing future is dropped, which cancels an in-flight
/// request. There is no retry.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used as the timer (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use netid::external::{ExternalIpFetcher, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() {
/// let fetcher = ExternalIpFetcher::new(
///     ReqwestClient::new(),
///     Url::parse("https://api.ipify.org").unwrap(),
/// );
/// println!("{}", fetcher.fetch(Duration::from_secs(3)).await);
/// # }
/// ```
#[derive(Debug)]
pub struct ExternalIpFetcher<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    endpoint: url::Url,
}

impl<H> ExternalIpFetcher<H, TokioSleeper> {
    /// Creates a fetcher using the Tokio timer.
    #[must_use]
    pub const fn new(client: H, endpoint: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            endpoint,
        }
    }
}

impl<H, S> ExternalIpFetcher<H, S> {
    /// Sets a custom sleeper for the timeout side of the race.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ExternalIpFetcher<H, S2> {
        ExternalIpFetcher {
            client: self.client,
            sleeper,
            endpoint: self.endpoint,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

impl<H: HttpClient, S: Sleeper> ExternalIpFetcher<H, S> {
    /// Looks up the external address, giving up after `timeout`.
    pub async fn fetch(&self, timeout: Duration) -> ExternalIpResult {
        let request = HttpRequest::get(self.endpoint.clone())
            .with_header(ACCEPT, HeaderValue::from_static("text/plain"));

        tracing::debug!("Querying {} (timeout {}ms)", self.endpoint, timeout.as_millis());

        tokio::select! {
            biased;

            outcome = self.client.request(request) => ExternalIpResult::from_response(outcome),

            () = self.sleeper.sleep(timeout) => {
                tracing::debug!("External IP request abandoned after {}ms", timeout.as_millis());
                ExternalIpResult::TimedOut
            }
        }
    }
}
