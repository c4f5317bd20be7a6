//! Tests for configuration file loading.

use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, tempdir};

use crate::config::{default_config_path, write_default_config};

use super::*;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

mod explicit_path {
    use super::*;

    #[test]
    fn loads_config_from_flag() {
        let file = write_temp("[external_ip]\ntimeout = 9\n");
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load_with_default(&cli(&["--config", path]), None).unwrap();

        assert_eq!(config.external_timeout.as_secs(), 9);
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_explicit_file_returns_error() {
        let result = ValidatedConfig::load_with_default(
            &cli(&["--config", "/nonexistent/netid.toml"]),
            None,
        );

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn malformed_file_returns_parse_error() {
        let file = write_temp("[external_ip\n");
        let path = file.path().to_str().unwrap();

        let result = ValidatedConfig::load_with_default(&cli(&["--config", path]), None);

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn explicit_path_wins_over_fallback() {
        let explicit = write_temp("[external_ip]\ntimeout = 9\n");
        let fallback = write_temp("[external_ip]\ntimeout = 1\n");
        let path = explicit.path().to_str().unwrap();

        let config =
            ValidatedConfig::load_with_default(&cli(&["--config", path]), Some(fallback.path()))
                .unwrap();

        assert_eq!(config.external_timeout.as_secs(), 9);
    }
}

mod fallback_path {
    use super::*;

    #[test]
    fn existing_fallback_is_loaded() {
        let fallback = write_temp("[diagnostic]\ngateway_label = \"Standardgateway\"\n");

        let config = ValidatedConfig::load_with_default(&cli(&[]), Some(fallback.path())).unwrap();

        assert_eq!(config.parser.label(), "Standardgateway");
        assert_eq!(config.config_file.as_deref(), Some(fallback.path()));
    }

    #[test]
    fn missing_fallback_uses_defaults() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("config.toml");

        let config = ValidatedConfig::load_with_default(&cli(&[]), Some(&absent)).unwrap();

        assert!(config.config_file.is_none());
        assert_eq!(config.external_timeout.as_secs(), 3);
    }

    #[test]
    fn directory_as_fallback_is_ignored() {
        let dir = tempdir().unwrap();

        let config = ValidatedConfig::load_with_default(&cli(&[]), Some(dir.path())).unwrap();

        assert!(config.config_file.is_none());
    }

    #[test]
    fn default_path_ends_with_netid_config() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(Path::new("netid").join("config.toml")));
        }
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template_that_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netid.toml");

        write_default_config(&path).unwrap();
        let config = ValidatedConfig::load_with_default(
            &cli(&["--config", path.to_str().unwrap()]),
            None,
        )
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "https://api.ipify.org/");
    }

    #[test]
    fn unwritable_path_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("netid.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
