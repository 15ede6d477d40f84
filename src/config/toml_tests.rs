//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.clusters.is_empty());
        assert!(config.audit_log.is_none());
        assert!(config.http_auth.is_none());
    }

    #[test]
    fn parse_clusters_table() {
        let config = TomlConfig::parse(
            r#"
            [clusters]
            logs = "10.1.0.5:9200"
            metrics = "https://metrics.example.com:9200"
        "#,
        )
        .unwrap();

        assert_eq!(config.clusters.len(), 2);
        assert_eq!(config.cluster_address("logs"), Some("10.1.0.5:9200"));
        assert_eq!(
            config.cluster_address("metrics"),
            Some("https://metrics.example.com:9200")
        );
        assert_eq!(config.cluster_address("missing"), None);
    }

    #[test]
    fn parse_top_level_keys() {
        let config = TomlConfig::parse(
            r#"
            http_auth = "elastic:changeme"
            audit_log = "/var/log/elastic-trib.log"
        "#,
        )
        .unwrap();

        assert_eq!(config.http_auth.as_deref(), Some("elastic:changeme"));
        assert_eq!(
            config.audit_log.as_deref().and_then(|p| p.to_str()),
            Some("/var/log/elastic-trib.log")
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = TomlConfig::parse(r#"hosts = ["a"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn non_string_address_is_rejected() {
        let result = TomlConfig::parse(
            r"
            [clusters]
            logs = 9200
        ",
        );
        assert!(result.is_err());
    }
}

mod loading {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[clusters]\nlocal = \"127.0.0.1:9200\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.cluster_address("local"), Some("127.0.0.1:9200"));
    }

    #[test]
    fn load_missing_file_returns_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TomlConfig::load(&dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.clusters.is_empty());
        assert!(config.http_auth.is_none());
    }

    #[test]
    fn default_template_mentions_clusters_table() {
        assert!(default_config_template().contains("[clusters]"));
    }
}
