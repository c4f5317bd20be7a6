//! Portable network queries using `pnet` interface enumeration.
//!
//! On Linux the gateway table is read from `/proc/net/route`; other Unix
//! systems have no native gateway source here and rely on the diagnostic
//! fallback.

use std::net::{IpAddr, Ipv4Addr};

use pnet::datalink::{self, NetworkInterface};

use crate::network::{AddressEntry, InterfaceRecord, NetworkQuerySource, QueryError, RouteEntry};

/// Path of the kernel IPv4 routing table.
#[cfg(target_os = "linux")]
const PROC_ROUTE: &str = "/proc/net/route";

/// Portable implementation of [`NetworkQuerySource`] backed by `pnet`.
#[derive(Debug, Clone, Default)]
pub struct PortableSource {
    _private: (),
}

impl PortableSource {
    /// Creates a new portable network source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl NetworkQuerySource for PortableSource {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, QueryError> {
        Ok(datalink::interfaces().iter().map(to_record).collect())
    }

    fn route_table(&self) -> Result<Vec<RouteEntry>, QueryError> {
        let defaults = default_routes()?;

        Ok(datalink::interfaces()
            .iter()
            .map(|iface| {
                let unicast = iface
                    .ips
                    .iter()
                    .filter_map(|net| match net.ip() {
                        IpAddr::V4(v4) => Some(v4),
                        IpAddr::V6(_) => None,
                    })
                    .collect();
                let gateways = defaults
                    .iter()
                    .filter(|(name, _)| *name == iface.name)
                    .map(|(_, gateway)| IpAddr::V4(*gateway))
                    .collect();
                RouteEntry::new(unicast, gateways)
            })
            .collect())
    }
}

fn to_record(iface: &NetworkInterface) -> InterfaceRecord {
    InterfaceRecord {
        name: iface.name.clone(),
        is_up: iface.is_up(),
        is_running: iface.is_running(),
        is_loopback: iface.is_loopback(),
        addresses: iface
            .ips
            .iter()
            .map(|net| AddressEntry::new(net.ip(), net.mask()))
            .collect(),
    }
}

#[cfg(target_os = "linux")]
fn default_routes() -> Result<Vec<(String, Ipv4Addr)>, QueryError> {
    let content = std::fs::read_to_string(PROC_ROUTE).map_err(QueryError::RouteTable)?;
    Ok(parse_proc_route(&content))
}

#[cfg(not(target_os = "linux"))]
#[allow(clippy::unnecessary_wraps)]
const fn default_routes() -> Result<Vec<(String, Ipv4Addr)>, QueryError> {
    Ok(Vec::new())
}

/// Parses `/proc/net/route` content into `(interface, gateway)` default routes.
///
/// Only rows with destination `00000000` and a non-zero gateway are kept.
/// Addresses in the file are little-endian hex.
#[must_use]
pub fn parse_proc_route(content: &str) -> Vec<(String, Ipv4Addr)> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 3 || cols[1] != "00000000" {
                return None;
            }
            let raw = u32::from_str_radix(cols[2], 16).ok()?;
            let gateway = Ipv4Addr::from(raw.to_le_bytes());
            (!gateway.is_unspecified()).then(|| (cols[0].to_string(), gateway))
        })
        .collect()
}
