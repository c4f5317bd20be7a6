//! Snapshot assembly and presentation.
//!
//! [`NetworkSnapshot`] is the single value handed to the presentation
//! layer. It is assembled once per resolution pass and never mutated.

mod render;


use serde::Serialize;

use crate::external::ExternalIpResult;
use crate::gateway::GatewayResult;
use crate::network::AdapterInfo;

pub use render::{NOT_FOUND, RenderError, Renderer, render_details, render_json, render_text};

/// The combined result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSnapshot {
    /// The selected adapter, if any interface qualified.
    pub adapter: Option<AdapterInfo>,
    /// Default gateway of the selected adapter.
    pub gateway: GatewayResult,
    /// Public address as seen by the echo service.
    pub external_ip: ExternalIpResult,
}

impl NetworkSnapshot {
    /// Combines the three partial results. Pure aggregation.
    #[must_use]
    pub const fn assemble(
        adapter: Option<AdapterInfo>,
        gateway: GatewayResult,
        external_ip: ExternalIpResult,
    ) -> Self {
        Self {
            adapter,
            gateway,
            external_ip,
        }
    }
}

/// Which view the presentation shell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The summary table.
    #[default]
    Basic,
    /// The raw diagnostic details dump.
    Advanced,
}

impl ViewMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Basic => Self::Advanced,
            Self::Advanced => Self::Basic,
        }
    }
}

/// Output format of the basic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned two-column table.
    #[default]
    Text,
    /// The snapshot as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn adapter() -> AdapterInfo {
        AdapterInfo::new(
            "Ethernet",
            Ipv4Addr::new(192, 168, 1, 10),
            Ipv4Addr::new(255, 255, 255, 0),
        )
    }

    #[test]
    fn assemble_keeps_all_parts() {
        let snapshot = NetworkSnapshot::assemble(
            Some(adapter()),
            GatewayResult::Resolved(Ipv4Addr::new(192, 168, 1, 1)),
            ExternalIpResult::TimedOut,
        );

        assert_eq!(snapshot.adapter, Some(adapter()));
        assert_eq!(
            snapshot.gateway,
            GatewayResult::Resolved(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(snapshot.external_ip, ExternalIpResult::TimedOut);
    }

    #[test]
    fn assemble_is_deterministic() {
        let build = || {
            NetworkSnapshot::assemble(
                None,
                GatewayResult::Unavailable,
                ExternalIpResult::Resolved("203.0.113.5".to_string()),
            )
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn view_mode_defaults_to_basic() {
        assert_eq!(ViewMode::default(), ViewMode::Basic);
    }

    #[test]
    fn view_mode_toggles_back_and_forth() {
        assert_eq!(ViewMode::Basic.toggled(), ViewMode::Advanced);
        assert_eq!(ViewMode::Advanced.toggled(), ViewMode::Basic);
        assert_eq!(ViewMode::Basic.toggled().toggled(), ViewMode::Basic);
    }
}
