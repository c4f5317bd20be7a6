//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use crate::report::OutputFormat;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// External address lookup section
    #[serde(default)]
    pub external_ip: ExternalIpSection,

    /// Diagnostic command section
    #[serde(default)]
    pub diagnostic: DiagnosticSection,

    /// Lease renewal section
    #[serde(default)]
    pub renew: RenewSection,

    /// Output section
    #[serde(default)]
    pub output: OutputSection,
}

/// External address lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalIpSection {
    /// IP echo service URL
    pub endpoint: Option<String>,

    /// Lookup timeout in seconds
    pub timeout: Option<u64>,
}

/// Diagnostic command section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticSection {
    /// Program producing the textual dump
    pub program: Option<String>,

    /// Arguments for the summary dump
    pub args: Option<Vec<String>>,

    /// Arguments for the details dump
    pub details_args: Option<Vec<String>>,

    /// Wait bound in seconds
    pub timeout: Option<u64>,

    /// Label of the gateway line
    pub gateway_label: Option<String>,
}

/// Lease renewal section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenewSection {
    /// Elevation program
    pub program: Option<String>,

    /// Program arguments
    pub args: Option<Vec<String>>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// "text" or "json"
    pub format: Option<OutputFormat>,

    /// Handlebars template
    pub template: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netid configuration file
# Every key is optional; CLI flags override the values set here.

[external_ip]
# IP echo service returning the public address as plain text
# endpoint = "https://api.ipify.org"

# Lookup timeout in seconds (default: 3)
# timeout = 3

[diagnostic]
# Command whose output is parsed when the native route table has no gateway.
# Defaults: "ipconfig" on Windows, "ip addr show" elsewhere.
# A custom program runs without arguments unless args/details_args are set.
# program = "ipconfig"
# args = []

# Arguments for the advanced view (default: ["/all"] on Windows)
# details_args = ["/all"]

# Wait bound in seconds (default: 5)
# timeout = 5

# Gateway line label, for localized ipconfig output
# gateway_label = "Default Gateway"

[renew]
# Elevated lease renewal command used by `netid renew`.
# A custom program runs without arguments unless args is set.
# program = "pkexec"
# args = ["dhclient"]

[output]
# Summary format: "text" or "json"
# format = "text"

# Handlebars template (overrides format)
# Available variables: {{adapter}}, {{ip_address}}, {{subnet_mask}}, {{gateway}}, {{external_ip}}
# template = "{{ip_address}} via {{gateway}} ({{external_ip}})"
"#
    .to_string()
}
