//! Network layer for enumerating interfaces and selecting the primary adapter.
//!
//! This module provides types and traits for:
//! - Describing host interfaces independently of the OS ([`InterfaceRecord`])
//! - Describing the native adapter/route table ([`RouteEntry`])
//! - Querying the OS for both ([`NetworkQuerySource`])
//! - Selecting the primary adapter ([`select_primary_adapter`])
//! - Platform-specific implementations ([`platform`])

mod adapter;
pub mod platform;
mod source;

pub use adapter::{AdapterInfo, AddressEntry, InterfaceRecord, select_from, select_primary_adapter};
pub use source::{NetworkQuerySource, QueryError, RouteEntry};
