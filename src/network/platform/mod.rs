//! Platform-specific network query implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`NetworkQuerySource`] trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `GetAdaptersAddresses` via the `windows` crate for
//!   both interface enumeration and the gateway table.
//! - **Unix**: Uses `pnet` interface enumeration; on Linux the gateway
//!   table comes from `/proc/net/route`.
//!
//! [`NetworkQuerySource`]: super::NetworkQuerySource

#[cfg(unix)]
mod portable;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use portable::{PortableSource, parse_proc_route};
#[cfg(windows)]
pub use windows::WindowsSource;

// Re-export platform-specific source as PlatformSource for convenience
#[cfg(unix)]
pub use portable::PortableSource as PlatformSource;
#[cfg(windows)]
pub use windows::WindowsSource as PlatformSource;
