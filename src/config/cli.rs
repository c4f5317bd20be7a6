//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::report::OutputFormat;

/// netid: Network Identity Reporter
///
/// Shows the primary adapter's address, subnet mask and default gateway,
/// plus the public address seen from the internet.
#[derive(Debug, Parser)]
#[command(name = "netid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// IP echo service queried for the external address
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// External address lookup timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Diagnostic command wait bound in seconds
    #[arg(long = "diagnostic-timeout", value_name = "SECS")]
    pub diagnostic_timeout: Option<u64>,

    /// Label of the gateway line in the diagnostic dump
    #[arg(long = "gateway-label", value_name = "LABEL")]
    pub gateway_label: Option<String>,

    /// Output format of the summary
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Handlebars template for the summary (overrides --format)
    #[arg(long)]
    pub template: Option<String>,

    /// Show the detailed diagnostic dump instead of the summary
    #[arg(long)]
    pub advanced: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for netid
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netid.toml")]
        output: PathBuf,
    },

    /// Request a lease renewal with elevated privileges and exit
    Renew,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the renew command.
    #[must_use]
    pub const fn is_renew(&self) -> bool {
        matches!(self.command, Some(Command::Renew))
    }
}
