//! External IP lookup over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The timed lookup itself ([`ExternalIpFetcher`], [`ExternalIpResult`])

mod client;
mod error;
mod fetcher;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use fetcher::{ExternalIpFetcher, ExternalIpResult};
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
