//! Rendering of snapshots and the details dump.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::gateway::DiagnosticError;

use super::{NetworkSnapshot, OutputFormat};

/// Shown for any adapter field when no adapter qualified.
pub const NOT_FOUND: &str = "Not found";

const LABEL_WIDTH: usize = 16;

/// Error type for rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Serializing the snapshot to JSON failed.
    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The output template failed to render.
    #[error("Failed to render template: {0}")]
    Template(String),
}

/// How a snapshot is turned into output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderer {
    /// Aligned two-column table.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// User-supplied Handlebars template.
    Template(String),
}

impl Renderer {
    /// Picks a renderer. A template takes precedence over the format.
    #[must_use]
    pub fn new(format: OutputFormat, template: Option<String>) -> Self {
        match (template, format) {
            (Some(template), _) => Self::Template(template),
            (None, OutputFormat::Text) => Self::Text,
            (None, OutputFormat::Json) => Self::Json,
        }
    }

    /// Renders the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if JSON serialization or template rendering
    /// fails. The text table never fails.
    pub fn render(&self, snapshot: &NetworkSnapshot) -> Result<String, RenderError> {
        match self {
            Self::Text => Ok(render_text(snapshot)),
            Self::Json => render_json(snapshot),
            Self::Template(template) => render_template(template, snapshot),
        }
    }
}

/// Flat string view of a snapshot, as exposed to templates.
#[derive(Debug, Serialize)]
struct TemplateData {
    adapter: String,
    ip_address: String,
    subnet_mask: String,
    gateway: String,
    external_ip: String,
}

impl From<&NetworkSnapshot> for TemplateData {
    fn from(snapshot: &NetworkSnapshot) -> Self {
        let (adapter, ip_address, subnet_mask) = snapshot.adapter.as_ref().map_or_else(
            || (NOT_FOUND.to_string(), NOT_FOUND.to_string(), NOT_FOUND.to_string()),
            |a| (a.name.clone(), a.local_ip.to_string(), a.subnet_mask.to_string()),
        );

        Self {
            adapter,
            ip_address,
            subnet_mask,
            gateway: snapshot.gateway.to_string(),
            external_ip: snapshot.external_ip.to_string(),
        }
    }
}

impl TemplateData {
    fn rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Adapter Type", self.adapter.as_str()),
            ("IP Address", self.ip_address.as_str()),
            ("Subnet Mask", self.subnet_mask.as_str()),
            ("Default Gateway", self.gateway.as_str()),
            ("External Address", self.external_ip.as_str()),
        ]
    }
}

/// Renders the snapshot as an aligned table, one property per line.
#[must_use]
pub fn render_text(snapshot: &NetworkSnapshot) -> String {
    let data = TemplateData::from(snapshot);
    let mut out = String::new();
    for (label, value) in data.rows() {
        out.push_str(&format!("{label:<LABEL_WIDTH$}  {value}\n"));
    }
    out
}

/// Renders the snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialization fails.
pub fn render_json(snapshot: &NetworkSnapshot) -> Result<String, RenderError> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    Ok(json)
}

fn render_template(template: &str, snapshot: &NetworkSnapshot) -> Result<String, RenderError> {
    let mut handlebars = Handlebars::new();
    // Plain-text output: no HTML escaping of adapter names.
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .render_template(template, &TemplateData::from(snapshot))
        .map_err(|e| RenderError::Template(e.to_string()))
}

/// Text shown by the advanced view for a details capture.
#[must_use]
pub fn render_details(outcome: &Result<String, DiagnosticError>) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(DiagnosticError::Spawn { .. }) => "Failed to start process".to_string(),
        Err(DiagnosticError::TimedOut(_)) => "Process timed out".to_string(),
        Err(e) => e.to_string(),
    }
}
