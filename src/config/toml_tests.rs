//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};
use crate::report::OutputFormat;

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.external_ip.endpoint.is_none());
        assert!(config.diagnostic.program.is_none());
        assert!(config.renew.args.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn parse_external_ip_section() {
        let toml = r#"
            [external_ip]
            endpoint = "https://ifconfig.me/ip"
            timeout = 10
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.external_ip.endpoint.as_deref(),
            Some("https://ifconfig.me/ip")
        );
        assert_eq!(config.external_ip.timeout, Some(10));
    }

    #[test]
    fn parse_diagnostic_section() {
        let toml = r#"
            [diagnostic]
            program = "ipconfig"
            args = []
            details_args = ["/all"]
            timeout = 8
            gateway_label = "Passerelle par défaut"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let diagnostic = &config.diagnostic;

        assert_eq!(diagnostic.program.as_deref(), Some("ipconfig"));
        assert_eq!(diagnostic.args.as_deref(), Some(&[][..]));
        assert_eq!(diagnostic.details_args, Some(vec!["/all".to_string()]));
        assert_eq!(diagnostic.timeout, Some(8));
        assert_eq!(
            diagnostic.gateway_label.as_deref(),
            Some("Passerelle par défaut")
        );
    }

    #[test]
    fn parse_renew_and_output_sections() {
        let toml = r#"
            [renew]
            program = "sudo"
            args = ["dhclient", "-r"]

            [output]
            format = "json"
            template = "{{ip_address}}"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.renew.program.as_deref(), Some("sudo"));
        assert_eq!(
            config.renew.args,
            Some(vec!["dhclient".to_string(), "-r".to_string()])
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.template.as_deref(), Some("{{ip_address}}"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[monitor]\ninterval = 5\n");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = TomlConfig::parse("[external_ip]\nretries = 3\n");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = TomlConfig::parse("[output]\nformat = \"yaml\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[external_ip]\ntimeout = \"3\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = TomlConfig::load(std::path::Path::new("/nonexistent/netid.toml"));

        assert!(matches!(
            result,
            Err(ConfigError::FileRead { .. })
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        // Everything is commented out, so all values fall back to defaults.
        assert!(config.external_ip.endpoint.is_none());
        assert!(config.diagnostic.timeout.is_none());
        assert!(config.output.template.is_none());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        for section in ["[external_ip]", "[diagnostic]", "[renew]", "[output]"] {
            assert!(template.contains(section), "missing {section}");
        }
    }
}
