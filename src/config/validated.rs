//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use handlebars::Handlebars;
use url::Url;

use crate::gateway::{CommandDump, DiagnosticTextParser};
use crate::renew::RenewCommand;
use crate::report::{OutputFormat, ViewMode};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Every value is resolved with the priority CLI > TOML > built-in default.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// IP echo service
    pub endpoint: Url,

    /// External lookup timeout
    pub external_timeout: Duration,

    /// Summary dump used by the gateway fallback
    pub diagnostic: CommandDump,

    /// Details dump shown by the advanced view
    pub details: CommandDump,

    /// Parser for the summary dump
    pub parser: DiagnosticTextParser,

    /// Elevated renewal command
    pub renew: RenewCommand,

    /// Summary output format
    pub format: OutputFormat,

    /// Handlebars summary template (optional, validated)
    pub template: Option<String>,

    /// Which view to show
    pub view: ViewMode,

    /// Configuration file that was loaded, if any
    pub config_file: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ endpoint: {}, timeout: {}s, diagnostic: {} {:?} ({}s), renew: {}, \
             view: {:?}, format: {:?}, template: {}, file: {} }}",
            self.endpoint,
            self.external_timeout.as_secs(),
            self.diagnostic.program(),
            self.diagnostic.args(),
            self.diagnostic.wait().as_secs(),
            self.renew.program(),
            self.view,
            self.format,
            self.template.is_some(),
            config_file,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint URL is invalid or not HTTP(S)
    /// - A timeout is zero
    /// - A program name or the gateway label is empty
    /// - The template has invalid Handlebars syntax
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let endpoint = Self::resolve_endpoint(cli, toml)?;

        let external_timeout = resolve_seconds(
            "timeout",
            cli.timeout
                .or_else(|| toml.and_then(|t| t.external_ip.timeout)),
            defaults::external_timeout(),
        )?;

        let wait = resolve_seconds(
            "diagnostic_timeout",
            cli.diagnostic_timeout
                .or_else(|| toml.and_then(|t| t.diagnostic.timeout)),
            defaults::diagnostic_timeout(),
        )?;

        let (diagnostic, details) = Self::build_dumps(toml, wait)?;
        let parser = Self::build_parser(cli, toml)?;
        let renew = Self::build_renew(toml)?;

        let format = cli
            .format
            .or_else(|| toml.and_then(|t| t.output.format))
            .unwrap_or_default();

        let template = Self::resolve_template(cli, toml)?;

        let view = if cli.advanced {
            ViewMode::default().toggled()
        } else {
            ViewMode::default()
        };

        Ok(Self {
            endpoint,
            external_timeout,
            diagnostic,
            details,
            parser,
            renew,
            format,
            template,
            view,
            config_file: None,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path; a missing
    /// file is an error. Otherwise the per-user default location is used
    /// when a file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_default(cli, default_config_path().as_deref())
    }

    /// Like [`load`](Self::load), with an explicit fallback location.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_default(cli: &Cli, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| fallback.filter(|p| p.is_file()).map(Path::to_path_buf));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.external_ip.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn build_dumps(
        toml: Option<&TomlConfig>,
        wait: Duration,
    ) -> Result<(CommandDump, CommandDump), ConfigError> {
        let section = toml.map(|t| &t.diagnostic);
        let custom = section.and_then(|s| s.program.clone());
        let is_custom = custom.is_some();

        let program = non_empty(
            "diagnostic.program",
            custom.unwrap_or_else(|| defaults::DIAGNOSTIC_PROGRAM.to_string()),
        )?;

        let args = section
            .and_then(|s| s.args.clone())
            .unwrap_or_else(|| default_args(is_custom, defaults::DIAGNOSTIC_ARGS));

        let details_args = section
            .and_then(|s| s.details_args.clone())
            .unwrap_or_else(|| default_args(is_custom, defaults::DETAILS_ARGS));

        Ok((
            CommandDump::new(program.clone(), args, wait),
            CommandDump::new(program, details_args, wait),
        ))
    }

    fn build_parser(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<DiagnosticTextParser, ConfigError> {
        let label = cli
            .gateway_label
            .clone()
            .or_else(|| toml.and_then(|t| t.diagnostic.gateway_label.clone()))
            .unwrap_or_else(|| defaults::GATEWAY_LABEL.to_string());

        let label = non_empty("gateway_label", label)?;
        Ok(DiagnosticTextParser::new(label))
    }

    fn build_renew(toml: Option<&TomlConfig>) -> Result<RenewCommand, ConfigError> {
        let section = toml.map(|t| &t.renew);
        let custom = section.and_then(|s| s.program.clone());
        let is_custom = custom.is_some();

        let program = non_empty(
            "renew.program",
            custom.unwrap_or_else(|| defaults::RENEW_PROGRAM.to_string()),
        )?;

        let args = section
            .and_then(|s| s.args.clone())
            .unwrap_or_else(|| default_args(is_custom, defaults::RENEW_ARGS));

        Ok(RenewCommand::new(program, args))
    }

    fn resolve_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let template = cli
            .template
            .clone()
            .or_else(|| toml.and_then(|t| t.output.template.clone()));

        if let Some(ref tmpl) = template {
            Self::validate_template(tmpl)?;
        }

        Ok(template)
    }

    fn validate_template(template: &str) -> Result<(), ConfigError> {
        let hbs = Handlebars::new();
        // Compile-check only; render with empty context to validate syntax
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Returns the per-user configuration file location, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netid").join("config.toml"))
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_seconds(
    field: &'static str,
    value: Option<u64>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let duration = value.map_or(default, Duration::from_secs);

    if duration.is_zero() {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(duration)
}

/// Built-in arguments belong to the built-in program; a custom program
/// without explicit arguments runs with none.
fn default_args(custom_program: bool, list: &[&str]) -> Vec<String> {
    if custom_program {
        Vec::new()
    } else {
        defaults::args(list)
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue { field });
    }
    Ok(value)
}
