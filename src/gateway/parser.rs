//! Default-gateway extraction from interface-configuration dumps.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use super::GatewayResult;

/// Label that introduces the gateway line in `ipconfig` output.
pub const DEFAULT_GATEWAY_LABEL: &str = "Default Gateway";

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("dotted-quad pattern is valid")
});

/// Scans a diagnostic dump for the default gateway of one adapter.
///
/// The adapter's section starts at the first line mentioning the local
/// address and ends at the next blank line. Inside it, the line starting
/// with the gateway label supplies the gateway. If that line carries no
/// address (e.g. an IPv6 gateway is listed first), the following non-empty
/// lines of the block are searched. The first address found decides the
/// result; `0.0.0.0` yields [`GatewayResult::Unavailable`].
///
/// # Examples
///
/// ```
/// use netid::gateway::{DiagnosticTextParser, GatewayResult};
///
/// let dump = "\
/// Ethernet adapter Ethernet:
///
///    IPv4 Address. . . . . . . . . . . : 192.168.1.10
///    Subnet Mask . . . . . . . . . . . : 255.255.255.0
///    Default Gateway . . . . . . . . . : 192.168.1.1
/// ";
///
/// let parser = DiagnosticTextParser::default();
/// assert_eq!(
///     parser.parse(dump, "192.168.1.10".parse().unwrap()),
///     GatewayResult::Resolved("192.168.1.1".parse().unwrap()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticTextParser {
    label: String,
}

impl Default for DiagnosticTextParser {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_LABEL)
    }
}

impl DiagnosticTextParser {
    /// Creates a parser that looks for `label` (for localized dumps).
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Returns the configured gateway label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Extracts the gateway for `local_ip` from `text`.
    #[must_use]
    pub fn parse(&self, text: &str, local_ip: Ipv4Addr) -> GatewayResult {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let mut in_section = false;

        for (index, line) in lines.iter().enumerate() {
            if !in_section && mentions(line, local_ip) {
                in_section = true;
            }

            if in_section && line.starts_with(self.label.as_str()) {
                // Continuation lines are read only when the label line has no address.
                let candidate = dotted_quads(line).next().or_else(|| {
                    lines[index + 1..]
                        .iter()
                        .take_while(|next| !next.is_empty())
                        .find_map(|next| dotted_quads(next).next())
                });
                return candidate
                    .filter(|gateway| !gateway.is_unspecified())
                    .map_or(GatewayResult::Unavailable, GatewayResult::Resolved);
            }

            if in_section && line.is_empty() {
                break;
            }
        }

        GatewayResult::Unavailable
    }
}

/// Parses with the default `"Default Gateway"` label.
#[must_use]
pub fn parse_gateway(text: &str, local_ip: Ipv4Addr) -> GatewayResult {
    DiagnosticTextParser::default().parse(text, local_ip)
}

/// Returns every valid dotted-quad on a line, in order.
fn dotted_quads(line: &str) -> impl Iterator<Item = Ipv4Addr> + '_ {
    DOTTED_QUAD
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
}

fn mentions(line: &str, ip: Ipv4Addr) -> bool {
    dotted_quads(line).any(|candidate| candidate == ip)
}
