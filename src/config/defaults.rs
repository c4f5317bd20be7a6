//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default IP echo service.
pub const ENDPOINT: &str = "https://api.ipify.org";

/// Default external lookup timeout in seconds.
pub const EXTERNAL_TIMEOUT_SECS: u64 = 3;

/// Default diagnostic command wait bound in seconds.
pub const DIAGNOSTIC_TIMEOUT_SECS: u64 = 5;

/// Default gateway label in the diagnostic dump.
pub const GATEWAY_LABEL: &str = crate::gateway::DEFAULT_GATEWAY_LABEL;

/// Diagnostic dump program.
#[cfg(windows)]
pub const DIAGNOSTIC_PROGRAM: &str = "ipconfig";
/// Diagnostic dump program.
#[cfg(not(windows))]
pub const DIAGNOSTIC_PROGRAM: &str = "ip";

/// Arguments for the summary dump.
#[cfg(windows)]
pub const DIAGNOSTIC_ARGS: &[&str] = &[];
/// Arguments for the summary dump.
#[cfg(not(windows))]
pub const DIAGNOSTIC_ARGS: &[&str] = &["addr", "show"];

/// Arguments for the details dump shown by the advanced view.
#[cfg(windows)]
pub const DETAILS_ARGS: &[&str] = &["/all"];
/// Arguments for the details dump shown by the advanced view.
#[cfg(not(windows))]
pub const DETAILS_ARGS: &[&str] = &["-d", "addr", "show"];

/// Elevated renewal program.
#[cfg(windows)]
pub const RENEW_PROGRAM: &str = "powershell";
/// Elevated renewal program.
#[cfg(not(windows))]
pub const RENEW_PROGRAM: &str = "pkexec";

/// Elevated renewal arguments.
#[cfg(windows)]
pub const RENEW_ARGS: &[&str] = &[
    "-NoProfile",
    "-WindowStyle",
    "Hidden",
    "-Command",
    "Start-Process ipconfig -ArgumentList '/renew' -Verb runAs -WindowStyle Hidden",
];
/// Elevated renewal arguments.
#[cfg(not(windows))]
pub const RENEW_ARGS: &[&str] = &["dhclient"];

/// Default external lookup timeout as Duration.
#[must_use]
pub const fn external_timeout() -> Duration {
    Duration::from_secs(EXTERNAL_TIMEOUT_SECS)
}

/// Default diagnostic wait bound as Duration.
#[must_use]
pub const fn diagnostic_timeout() -> Duration {
    Duration::from_secs(DIAGNOSTIC_TIMEOUT_SECS)
}

/// Converts a default argument list into owned strings.
#[must_use]
pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
