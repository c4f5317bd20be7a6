//! One identity resolution pass.
//!
//! Wires adapter selection, gateway resolution and the external lookup
//! together and assembles the result into a [`NetworkSnapshot`].

use std::time::Duration;

use crate::external::{ExternalIpFetcher, HttpClient};
use crate::gateway::{DiagnosticSource, GatewayResolver, GatewayResult};
use crate::network::{AdapterInfo, NetworkQuerySource, select_primary_adapter};
use crate::report::NetworkSnapshot;
use crate::time::{Sleeper, TokioSleeper};

/// Resolves the host's network identity.
///
/// The local chain (adapter, then gateway for its address) and the
/// external lookup run concurrently. Nothing is cached between passes.
///
/// # Type Parameters
///
/// - `S`: The network query source
/// - `D`: The diagnostic dump source used by the gateway fallback
/// - `H`: The HTTP client for the external lookup
/// - `T`: The sleeper bounding the external lookup
#[derive(Debug)]
pub struct IdentityResolver<S, D, H, T = TokioSleeper> {
    gateway: GatewayResolver<S, D>,
    external: ExternalIpFetcher<H, T>,
    timeout: Duration,
}

impl<S, D, H, T> IdentityResolver<S, D, H, T> {
    /// Creates a resolver.
    ///
    /// `timeout` bounds the external lookup only.
    #[must_use]
    pub const fn new(
        gateway: GatewayResolver<S, D>,
        external: ExternalIpFetcher<H, T>,
        timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            external,
            timeout,
        }
    }

    /// Returns the gateway resolver.
    #[must_use]
    pub const fn gateway(&self) -> &GatewayResolver<S, D> {
        &self.gateway
    }

    /// Returns the external lookup timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S, D, H, T> IdentityResolver<S, D, H, T>
where
    S: NetworkQuerySource,
    D: DiagnosticSource,
    H: HttpClient,
    T: Sleeper,
{
    /// Runs one resolution pass. Never fails; absence is part of the result.
    pub async fn resolve(&self) -> NetworkSnapshot {
        // The fetch is polled first so its timer and request start before
        // the synchronous adapter and route queries run.
        let (external_ip, (adapter, gateway)) =
            tokio::join!(self.external.fetch(self.timeout), self.resolve_local());

        tracing::debug!(
            "Resolved adapter={:?} gateway={gateway} external={external_ip}",
            adapter.as_ref().map(|a| a.name.as_str())
        );

        NetworkSnapshot::assemble(adapter, gateway, external_ip)
    }

    async fn resolve_local(&self) -> (Option<AdapterInfo>, GatewayResult) {
        let Some(adapter) = select_primary_adapter(self.gateway.source()) else {
            tracing::debug!("No eligible adapter; skipping gateway resolution");
            return (None, GatewayResult::Unavailable);
        };

        let gateway = self.gateway.resolve(adapter.local_ip).await;
        (Some(adapter), gateway)
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
