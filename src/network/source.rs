//! Network query trait and error types.

use std::net::{IpAddr, Ipv4Addr};

use thiserror::Error;

use super::InterfaceRecord;

/// Error type for OS network queries.
///
/// Describes what went wrong without dictating recovery strategy.
/// Resolution treats every variant as "nothing found".
#[derive(Debug, Error)]
pub enum QueryError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The route table could not be read.
    #[error("Failed to read route table: {0}")]
    RouteTable(#[source] std::io::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// One adapter's row in the native adapter/route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteEntry {
    /// Unicast IPv4 addresses bound to the adapter.
    pub unicast: Vec<Ipv4Addr>,
    /// Gateway addresses associated with the adapter, in OS order.
    pub gateways: Vec<IpAddr>,
}

impl RouteEntry {
    /// Creates a new route entry.
    #[must_use]
    pub const fn new(unicast: Vec<Ipv4Addr>, gateways: Vec<IpAddr>) -> Self {
        Self { unicast, gateways }
    }

    /// Returns the first gateway that is IPv4 and not `0.0.0.0`.
    #[must_use]
    pub fn first_usable_gateway(&self) -> Option<Ipv4Addr> {
        self.gateways.iter().find_map(|gateway| match gateway {
            IpAddr::V4(v4) if !v4.is_unspecified() => Some(*v4),
            _ => None,
        })
    }
}

/// Trait for querying the host's network configuration.
///
/// # Design
///
/// - One implementation per platform (native API vs. portable enumeration)
/// - Enables dependency injection for testing with mock implementations
/// - Both operations are synchronous, read-only system queries
///
/// # Example
///
/// ```ignore
/// use netid::network::{InterfaceRecord, NetworkQuerySource, QueryError, RouteEntry};
///
/// struct Fixed(Vec<InterfaceRecord>);
///
/// impl NetworkQuerySource for Fixed {
///     fn interfaces(&self) -> Result<Vec<InterfaceRecord>, QueryError> {
///         Ok(self.0.clone())
///     }
///     fn route_table(&self) -> Result<Vec<RouteEntry>, QueryError> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait NetworkQuerySource: Send + Sync {
    /// Enumerates all host interfaces in OS order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the platform query fails.
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, QueryError>;

    /// Reads the adapter/route table used for native gateway lookup.
    ///
    /// Platforms without a native gateway source return entries with empty
    /// gateway lists (or no entries at all).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the platform query fails.
    fn route_table(&self) -> Result<Vec<RouteEntry>, QueryError>;
}

impl<T: NetworkQuerySource + ?Sized> NetworkQuerySource for std::sync::Arc<T> {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, QueryError> {
        (**self).interfaces()
    }

    fn route_table(&self) -> Result<Vec<RouteEntry>, QueryError> {
        (**self).route_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_usable_gateway_skips_unspecified() {
        let entry = RouteEntry::new(
            vec![Ipv4Addr::new(192, 168, 1, 10)],
            vec![
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)),
            ],
        );
        assert_eq!(
            entry.first_usable_gateway(),
            Some(Ipv4Addr::new(192, 168, 1, 1))
        );
    }

    #[test]
    fn first_usable_gateway_skips_ipv6() {
        let entry = RouteEntry::new(
            vec![],
            vec![
                "fe80::1".parse().unwrap(),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            ],
        );
        assert_eq!(entry.first_usable_gateway(), Some(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn first_usable_gateway_none_when_empty() {
        assert_eq!(RouteEntry::default().first_usable_gateway(), None);
    }

    #[test]
    fn query_error_platform_displays_message() {
        let error = QueryError::Platform {
            message: "unsupported operation".to_string(),
        };
        assert!(error.to_string().contains("unsupported operation"));
    }

    #[test]
    fn query_error_route_table_displays_source() {
        let error = QueryError::RouteTable(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(error.to_string().contains("no such file"));
    }
}
