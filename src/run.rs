//! Application execution logic.
//!
//! Runs a single resolution pass for the selected view and writes the
//! result to stdout.

use std::io::Write;

use thiserror::Error;

use netid::config::ValidatedConfig;
use netid::external::{ExternalIpFetcher, ReqwestClient};
use netid::gateway::{CommandDump, DiagnosticSource, GatewayResolver};
use netid::identity::IdentityResolver;
use netid::network::platform::PlatformSource;
use netid::report::{NetworkSnapshot, RenderError, Renderer, ViewMode, render_details};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The snapshot could not be rendered.
    #[error("Failed to render report: {0}")]
    Render(#[from] RenderError),

    /// Writing the report to stdout failed.
    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),
}

/// Type alias for the application's identity resolver.
type AppResolver = IdentityResolver<PlatformSource, CommandDump, ReqwestClient>;

/// Executes one pass of the selected view.
///
/// # Errors
///
/// Returns an error if the report cannot be rendered or written. Network
/// failures never end up here; they are part of the report.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    tracing::debug!("Showing {:?} view", config.view);

    let output = match config.view {
        ViewMode::Basic => {
            let resolver = create_resolver(&config);
            tracing::debug!(
                "External lookup bounded at {}ms, gateway label {:?}",
                resolver.timeout().as_millis(),
                resolver.gateway().parser().label()
            );
            let snapshot = resolver.resolve().await;
            present(&snapshot, &Renderer::new(config.format, config.template.clone()))?
        }
        ViewMode::Advanced => advanced_view(&config.details).await,
    };

    write_output(&mut std::io::stdout().lock(), &output)
}

/// Creates the production resolver from configuration.
fn create_resolver(config: &ValidatedConfig) -> AppResolver {
    let gateway = GatewayResolver::new(PlatformSource::new(), config.diagnostic.clone())
        .with_parser(config.parser.clone());

    let external = ExternalIpFetcher::new(ReqwestClient::new(), config.endpoint.clone());

    IdentityResolver::new(gateway, external, config.external_timeout)
}

/// Renders the basic view.
fn present(snapshot: &NetworkSnapshot, renderer: &Renderer) -> Result<String, RunError> {
    Ok(renderer.render(snapshot)?)
}

/// Captures the details dump for the advanced view.
async fn advanced_view<D: DiagnosticSource>(details: &D) -> String {
    let outcome = details.capture().await;
    if let Err(ref e) = outcome {
        tracing::debug!("Details dump failed: {e}");
    }
    render_details(&outcome)
}

/// Writes the report, terminated by a newline.
fn write_output<W: Write>(out: &mut W, text: &str) -> Result<(), RunError> {
    out.write_all(text.as_bytes()).map_err(RunError::Output)?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").map_err(RunError::Output)?;
    }
    out.flush().map_err(RunError::Output)
}
