//! Windows-specific network queries using `GetAdaptersAddresses`.

use crate::network::{AddressEntry, InterfaceRecord, NetworkQuerySource, QueryError, RouteEntry};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_INCLUDE_GATEWAYS, GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER,
    GAA_FLAG_SKIP_MULTICAST, GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, SOCKADDR_IN, SOCKADDR_IN6, SOCKET_ADDRESS,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`NetworkQuerySource`] using `GetAdaptersAddresses`.
///
/// A single IPv4 adapter walk (with gateways included) feeds both the
/// interface list and the gateway table. An adapter whose operational
/// status is Up counts as both up and running.
///
/// # Example
///
/// ```ignore
/// use netid::network::{NetworkQuerySource, platform::WindowsSource};
///
/// let source = WindowsSource::new();
/// for iface in source.interfaces().expect("Failed to enumerate adapters") {
///     println!("{}: {:?}", iface.name, iface.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsSource {
    _private: (),
}

impl WindowsSource {
    /// Creates a new Windows network source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl NetworkQuerySource for WindowsSource {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, QueryError> {
        Ok(walk_adapters()?
            .into_iter()
            .map(|adapter| adapter.record)
            .collect())
    }

    fn route_table(&self) -> Result<Vec<RouteEntry>, QueryError> {
        Ok(walk_adapters()?
            .into_iter()
            .map(|adapter| adapter.route)
            .collect())
    }
}

/// One adapter from the native walk, in both shapes.
struct NativeAdapter {
    record: InterfaceRecord,
    route: RouteEntry,
}

/// Walks the adapter linked list returned by `GetAdaptersAddresses`.
fn walk_adapters() -> Result<Vec<NativeAdapter>, QueryError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut adapters = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The list is valid as long as the buffer (`raw_adapters`) is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };
        adapters.push(parse_adapter(adapter));
        current = adapter.Next;
    }

    Ok(adapters)
}

/// Calls `GetAdaptersAddresses` for IPv4 and returns the raw buffer.
///
/// Two-call pattern: estimated buffer first, exact size on overflow.
fn get_adapter_addresses() -> Result<Vec<u8>, QueryError> {
    let flags = GAA_FLAG_INCLUDE_GATEWAYS
        | GAA_FLAG_SKIP_ANYCAST
        | GAA_FLAG_SKIP_MULTICAST
        | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_INET.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, retrying once with a larger buffer.
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), QueryError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as above, but with correctly sized buffer
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        };

        if result != NO_ERROR.0 {
            return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
        }
    } else if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

/// Converts a single `IP_ADAPTER_ADDRESSES_LH` into an interface record and route entry.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> NativeAdapter {
    // An unreadable friendly name must not hide the adapter's gateways.
    let name = unsafe { adapter.FriendlyName.to_string() }.unwrap_or_default();
    let is_up = adapter.OperStatus == IfOperStatusUp;
    let is_loopback = adapter.IfType == IF_TYPE_SOFTWARE_LOOPBACK;

    let addresses = collect_unicast(adapter);
    let unicast = addresses
        .iter()
        .filter_map(|entry| match entry.ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .collect();
    let gateways = collect_gateways(adapter);

    NativeAdapter {
        record: InterfaceRecord {
            name,
            is_up,
            is_running: is_up,
            is_loopback,
            addresses,
        },
        route: RouteEntry::new(unicast, gateways),
    }
}

/// Collects unicast addresses with netmasks derived from the on-link prefix length.
fn collect_unicast(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<AddressEntry> {
    let mut addresses = Vec::new();
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };
        if let Some(ip) = socket_address_to_ip(&entry.Address) {
            let netmask = prefix_to_mask(ip, entry.OnLinkPrefixLength);
            addresses.push(AddressEntry::new(ip, netmask));
        }
        unicast = entry.Next;
    }

    addresses
}

/// Collects gateway addresses in the order Windows reports them.
fn collect_gateways(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<IpAddr> {
    let mut gateways = Vec::new();
    let mut gateway = adapter.FirstGatewayAddress;

    // SAFETY: Each entry is valid as long as the parent adapter buffer is alive.
    while !gateway.is_null() {
        let entry = unsafe { &*gateway };
        if let Some(ip) = socket_address_to_ip(&entry.Address) {
            gateways.push(ip);
        }
        gateway = entry.Next;
    }

    gateways
}

/// Reads an IPv4 or IPv6 address out of a `SOCKET_ADDRESS`.
///
/// # Safety Note
///
/// The pointer casts to `SOCKADDR_IN` and `SOCKADDR_IN6` are allowed despite alignment
/// concerns because Windows guarantees proper alignment of these structures when returned
/// from the networking APIs.
#[allow(clippy::cast_ptr_alignment)]
fn socket_address_to_ip(address: &SOCKET_ADDRESS) -> Option<IpAddr> {
    // SAFETY: lpSockaddr is either null or points to a SOCKADDR of the stated family.
    let sockaddr = unsafe { address.lpSockaddr.as_ref() }?;

    match sockaddr.sa_family {
        f if f == AF_INET => {
            // SAFETY: We verified the family is AF_INET, so this is a valid cast.
            let sockaddr_in = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
            // SAFETY: sin_addr contains the IPv4 address bytes in network order.
            let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
            Some(IpAddr::V4(Ipv4Addr::new(
                octets.s_b1,
                octets.s_b2,
                octets.s_b3,
                octets.s_b4,
            )))
        }
        f if f == AF_INET6 => {
            // SAFETY: We verified the family is AF_INET6, so this is a valid cast.
            let sockaddr_in6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
            // SAFETY: We verified this is an IPv6 address, so the union field is valid.
            let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

/// Builds a netmask of the same family as `ip` from a prefix length.
const fn prefix_to_mask(ip: IpAddr, prefix: u8) -> IpAddr {
    match ip {
        IpAddr::V4(_) => {
            let bits = match u32::MAX.checked_shl(32u32.saturating_sub(prefix as u32)) {
                Some(mask) => mask,
                None => 0,
            };
            IpAddr::V4(Ipv4Addr::from_bits(bits))
        }
        IpAddr::V6(_) => {
            let bits = match u128::MAX.checked_shl(128u32.saturating_sub(prefix as u32)) {
                Some(mask) => mask,
                None => 0,
            };
            IpAddr::V6(Ipv6Addr::from_bits(bits))
        }
    }
}
