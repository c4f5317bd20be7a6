//! Default gateway resolution.
//!
//! This module provides:
//! - The resolution outcome ([`GatewayResult`])
//! - Native route-table lookup ([`lookup_native`])
//! - Textual parsing of diagnostic dumps ([`DiagnosticTextParser`])
//! - Bounded diagnostic subprocess capture ([`CommandDump`], [`DiagnosticSource`])
//! - The two-phase resolver ([`GatewayResolver`])

mod diagnostic;
mod parser;


use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::network::{NetworkQuerySource, RouteEntry};

pub use diagnostic::{CommandDump, DiagnosticError, DiagnosticSource};
pub use parser::{DEFAULT_GATEWAY_LABEL, DiagnosticTextParser, parse_gateway};

/// Outcome of default gateway resolution.
///
/// `Unavailable` is a normal terminal state: gateway information is
/// advisory and its absence is rendered, not raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum GatewayResult {
    /// A usable IPv4 gateway was found.
    Resolved(Ipv4Addr),
    /// No gateway could be determined.
    Unavailable,
}

impl fmt::Display for GatewayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(address) => write!(f, "{address}"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// Looks up the gateway for `local_ip` in a native adapter/route table.
///
/// Entries are scanned in order; for each entry bound to `local_ip`, the
/// first IPv4 gateway other than `0.0.0.0` wins. An entry that matches but
/// carries no usable gateway does not stop the scan.
#[must_use]
pub fn lookup_native(table: &[RouteEntry], local_ip: Ipv4Addr) -> Option<Ipv4Addr> {
    table
        .iter()
        .filter(|entry| entry.unicast.contains(&local_ip))
        .find_map(RouteEntry::first_usable_gateway)
}

/// Two-phase default gateway resolver.
///
/// 1. **Native phase**: looks the local address up in the OS route table.
/// 2. **Fallback phase**: captures a diagnostic dump and parses it, only
///    when the native phase yields nothing.
///
/// Neither phase can fail the resolution; every failure ends in
/// [`GatewayResult::Unavailable`].
///
/// # Type Parameters
///
/// - `S`: The network query source for the native phase
/// - `D`: The diagnostic dump source for the fallback phase
#[derive(Debug)]
pub struct GatewayResolver<S, D> {
    source: S,
    dump: D,
    parser: DiagnosticTextParser,
}

impl<S, D> GatewayResolver<S, D> {
    /// Creates a resolver with the default gateway label.
    #[must_use]
    pub fn new(source: S, dump: D) -> Self {
        Self {
            source,
            dump,
            parser: DiagnosticTextParser::default(),
        }
    }

    /// Sets the parser used by the fallback phase.
    #[must_use]
    pub fn with_parser(mut self, parser: DiagnosticTextParser) -> Self {
        self.parser = parser;
        self
    }

    /// Returns the network query source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the diagnostic dump source.
    #[must_use]
    pub const fn dump(&self) -> &D {
        &self.dump
    }

    /// Returns the fallback parser.
    #[must_use]
    pub const fn parser(&self) -> &DiagnosticTextParser {
        &self.parser
    }
}

impl<S: NetworkQuerySource, D: DiagnosticSource> GatewayResolver<S, D> {
    /// Resolves the default gateway for `local_ip`.
    pub async fn resolve(&self, local_ip: Ipv4Addr) -> GatewayResult {
        if let Some(gateway) = self.resolve_native(local_ip) {
            tracing::debug!("Gateway {gateway} found in native route table");
            return GatewayResult::Resolved(gateway);
        }

        self.resolve_fallback(local_ip).await
    }

    fn resolve_native(&self, local_ip: Ipv4Addr) -> Option<Ipv4Addr> {
        match self.source.route_table() {
            Ok(table) => lookup_native(&table, local_ip),
            Err(e) => {
                tracing::debug!("Native route table unavailable: {e}");
                None
            }
        }
    }

    async fn resolve_fallback(&self, local_ip: Ipv4Addr) -> GatewayResult {
        tracing::debug!("Falling back to diagnostic dump for {local_ip}");

        match self.dump.capture().await {
            Ok(text) => {
                let result = self.parser.parse(&text, local_ip);
                tracing::debug!("Diagnostic dump gateway: {result}");
                result
            }
            Err(e) => {
                tracing::debug!("Diagnostic dump failed: {e}");
                GatewayResult::Unavailable
            }
        }
    }
}
