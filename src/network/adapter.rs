//! Core network types and primary adapter selection.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::Serialize;

use super::NetworkQuerySource;

/// A single address bound to an interface, with its netmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressEntry {
    /// The bound address.
    pub ip: IpAddr,
    /// The netmask of the bound address (same family as `ip`).
    pub netmask: IpAddr,
}

impl AddressEntry {
    /// Creates a new address entry.
    #[must_use]
    pub const fn new(ip: IpAddr, netmask: IpAddr) -> Self {
        Self { ip, netmask }
    }

    /// Returns the address and mask if this is an assigned, non-loopback
    /// IPv4 entry.
    #[must_use]
    pub const fn usable_v4(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        match (self.ip, self.netmask) {
            (IpAddr::V4(ip), IpAddr::V4(mask)) if !ip.is_loopback() && !ip.is_unspecified() => {
                Some((ip, mask))
            }
            _ => None,
        }
    }
}

/// A host network interface as reported by a [`NetworkQuerySource`].
///
/// Sources translate their native representation into this record so that
/// selection logic stays platform-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Human-readable interface name (e.g., "Ethernet", "wlan0").
    pub name: String,
    /// Administratively up.
    pub is_up: bool,
    /// Operationally running.
    pub is_running: bool,
    /// The loopback interface.
    pub is_loopback: bool,
    /// Bound addresses in the order the OS reports them.
    pub addresses: Vec<AddressEntry>,
}

impl InterfaceRecord {
    /// Creates a record that is up, running and not loopback.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<AddressEntry>) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            is_running: true,
            is_loopback: false,
            addresses,
        }
    }

    /// Sets the up/running/loopback flags.
    #[must_use]
    pub const fn with_flags(mut self, is_up: bool, is_running: bool, is_loopback: bool) -> Self {
        self.is_up = is_up;
        self.is_running = is_running;
        self.is_loopback = is_loopback;
        self
    }

    /// Returns true if the interface is up, running and not loopback.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.is_up && self.is_running && !self.is_loopback
    }

    /// Returns the first non-loopback IPv4 address and its mask.
    #[must_use]
    pub fn first_usable_v4(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        self.addresses.iter().find_map(AddressEntry::usable_v4)
    }
}

/// The primary adapter's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterInfo {
    /// Human-readable adapter name.
    pub name: String,
    /// Local IPv4 address.
    pub local_ip: Ipv4Addr,
    /// Subnet mask of the local address.
    pub subnet_mask: Ipv4Addr,
}

impl AdapterInfo {
    /// Creates a new adapter info.
    #[must_use]
    pub fn new(name: impl Into<String>, local_ip: Ipv4Addr, subnet_mask: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            local_ip,
            subnet_mask,
        }
    }
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.local_ip, self.subnet_mask)
    }
}

/// Selects the primary adapter from an enumerated interface list.
///
/// Enumeration order is the only tie-break: the first eligible interface
/// carrying a non-loopback IPv4 address wins, and within it the first such
/// address. Eligible interfaces without a usable address are skipped.
#[must_use]
pub fn select_from(interfaces: &[InterfaceRecord]) -> Option<AdapterInfo> {
    interfaces
        .iter()
        .filter(|iface| iface.is_eligible())
        .find_map(|iface| {
            iface
                .first_usable_v4()
                .map(|(ip, mask)| AdapterInfo::new(iface.name.clone(), ip, mask))
        })
}

/// Enumerates interfaces from `source` and selects the primary adapter.
///
/// An enumeration failure is logged and treated as "nothing found".
pub fn select_primary_adapter<S: NetworkQuerySource + ?Sized>(source: &S) -> Option<AdapterInfo> {
    let interfaces = match source.interfaces() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            tracing::warn!("Interface enumeration failed: {e}");
            return None;
        }
    };

    tracing::debug!("Enumerated {} interface(s)", interfaces.len());

    let selected = select_from(&interfaces);
    match &selected {
        Some(adapter) => tracing::debug!("Selected primary adapter {adapter}"),
        None => tracing::debug!("No eligible adapter with an IPv4 address"),
    }
    selected
}
