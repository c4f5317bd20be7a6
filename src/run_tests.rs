//! Tests for the run module.

use super::*;
use netid::config::Cli;
use netid::external::ExternalIpResult;
use netid::gateway::{DiagnosticError, GatewayResult};
use netid::network::AdapterInfo;
use std::net::Ipv4Addr;
use std::time::Duration;

mod run_error {
    use super::*;

    #[test]
    fn output_error_displays_source() {
        let error = RunError::Output(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));

        assert!(error.to_string().contains("Failed to write report"));
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn render_error_converts() {
        let error: RunError = RenderError::Template("bad".to_string()).into();

        assert!(matches!(error, RunError::Render(_)));
    }
}

mod resolver_wiring {
    use super::*;

    fn config(args: &[&str]) -> ValidatedConfig {
        let mut full = vec!["netid"];
        full.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full), None).unwrap()
    }

    #[test]
    fn create_resolver_uses_configured_values() {
        let config = config(&["--timeout", "7", "--gateway-label", "Standardgateway"]);

        let resolver = create_resolver(&config);

        assert_eq!(resolver.timeout(), Duration::from_secs(7));
        assert_eq!(resolver.gateway().parser().label(), "Standardgateway");
        assert_eq!(resolver.gateway().dump(), &config.diagnostic);
    }
}

mod presentation {
    use super::*;

    fn snapshot() -> NetworkSnapshot {
        NetworkSnapshot::assemble(
            Some(AdapterInfo::new(
                "Ethernet",
                Ipv4Addr::new(192, 168, 1, 10),
                Ipv4Addr::new(255, 255, 255, 0),
            )),
            GatewayResult::Unavailable,
            ExternalIpResult::NetworkError,
        )
    }

    #[test]
    fn present_uses_renderer() {
        let out = present(&snapshot(), &Renderer::Template("{{gateway}}".to_string())).unwrap();

        assert_eq!(out, "Unavailable");
    }

    #[test]
    fn present_propagates_template_errors() {
        let result = present(&snapshot(), &Renderer::Template("{{#if}}".to_string()));

        assert!(matches!(result, Err(RunError::Render(_))));
    }

    #[test]
    fn write_output_appends_missing_newline() {
        let mut buf = Vec::new();

        write_output(&mut buf, "203.0.113.5").unwrap();

        assert_eq!(buf, b"203.0.113.5\n");
    }

    #[test]
    fn write_output_keeps_existing_newline() {
        let mut buf = Vec::new();

        write_output(&mut buf, "line\n").unwrap();

        assert_eq!(buf, b"line\n");
    }
}

mod advanced {
    use super::*;

    struct FixedDump(Result<&'static str, ()>);

    impl DiagnosticSource for FixedDump {
        async fn capture(&self) -> Result<String, DiagnosticError> {
            self.0
                .map(ToString::to_string)
                .map_err(|()| DiagnosticError::TimedOut(Duration::from_secs(5)))
        }
    }

    #[tokio::test]
    async fn shows_dump_text() {
        let out = advanced_view(&FixedDump(Ok("Windows IP Configuration"))).await;

        assert_eq!(out, "Windows IP Configuration");
    }

    #[tokio::test]
    async fn shows_failure_message() {
        let out = advanced_view(&FixedDump(Err(()))).await;

        assert_eq!(out, "Process timed out");
    }
}
