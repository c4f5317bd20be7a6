//! netid: Network Identity Reporter
//!
//! A library for resolving the host's network identity: the primary
//! adapter's IPv4 address and mask, its default gateway, and the
//! externally visible address reported by a public echo service.

pub mod config;
pub mod external;
pub mod gateway;
pub mod identity;
pub mod network;
pub mod renew;
pub mod report;
pub mod time;
