//! Tests for CLI argument parsing.

use super::cli::{
    Cli, ClusterCommand, Command, IndicesCommand, LogFormat, NodesCommand, OutputFormat,
    TasksCommand,
};

mod global_options {
    use super::*;

    #[test]
    fn parse_target_options() {
        let cli = Cli::parse_from_iter([
            "elastic-trib",
            "--host",
            "10.0.0.5:9200",
            "--cluster",
            "logs",
            "--http-auth",
            "elastic:secret",
            "cluster",
            "health",
        ]);

        assert_eq!(cli.host.as_deref(), Some("10.0.0.5:9200"));
        assert_eq!(cli.cluster.as_deref(), Some("logs"));
        assert_eq!(cli.http_auth.as_deref(), Some("elastic:secret"));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter([
            "elastic-trib",
            "-H",
            "localhost",
            "-c",
            "prod",
            "-A",
            "u:p",
            "-v",
            "nodes",
            "info",
        ]);

        assert_eq!(cli.host.as_deref(), Some("localhost"));
        assert_eq!(cli.cluster.as_deref(), Some("prod"));
        assert_eq!(cli.http_auth.as_deref(), Some("u:p"));
        assert!(cli.verbose);
    }

    #[test]
    fn global_options_accepted_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "elastic-trib",
            "nodes",
            "exclude",
            "10.0.0.1",
            "--cluster",
            "logs",
            "--config",
            "/etc/elastic-trib.toml",
        ]);

        assert_eq!(cli.cluster.as_deref(), Some("logs"));
        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/etc/elastic-trib.toml")
        );
    }

    #[test]
    fn defaults_when_not_specified() {
        let cli = Cli::parse_from_iter(["elastic-trib", "tasks", "list"]);

        assert!(cli.host.is_none());
        assert!(cli.cluster.is_none());
        assert!(cli.config.is_none());
        assert!(cli.http_auth.is_none());
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn log_format_json() {
        let cli = Cli::parse_from_iter(["elastic-trib", "--log-format", "json", "tasks", "list"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}

mod nodes_commands {
    use super::*;

    #[test]
    fn exclude_takes_one_positional_list() {
        let cli = Cli::parse_from_iter(["elastic-trib", "nodes", "exclude", "10.0.0.1,10.0.0.2"]);

        match cli.command {
            Command::Nodes {
                command: NodesCommand::Exclude { ips },
            } => assert_eq!(ips.as_deref(), Some("10.0.0.1,10.0.0.2")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn include_without_argument_parses_to_none() {
        let cli = Cli::parse_from_iter(["elastic-trib", "nodes", "include"]);

        match cli.command {
            Command::Nodes {
                command: NodesCommand::Include { ips },
            } => assert!(ips.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn exclude_rejects_second_positional() {
        let result = Cli::try_parse_from_iter([
            "elastic-trib",
            "nodes",
            "exclude",
            "10.0.0.1",
            "10.0.0.2",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn aliases_resolve_to_same_command() {
        let cli = Cli::parse_from_iter(["elastic-trib", "n", "e", "10.0.0.1"]);

        assert!(matches!(
            cli.command,
            Command::Nodes {
                command: NodesCommand::Exclude { .. }
            }
        ));
    }

    #[test]
    fn cat_format_defaults_to_text() {
        let cli = Cli::parse_from_iter(["elastic-trib", "nodes", "cat"]);

        match cli.command {
            Command::Nodes {
                command: NodesCommand::Cat { format },
            } => assert_eq!(format, OutputFormat::Text),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn allocation_alias_and_json_format() {
        let cli = Cli::parse_from_iter(["elastic-trib", "nodes", "alloc", "--format", "json"]);

        match cli.command {
            Command::Nodes {
                command: NodesCommand::Allocation { format },
            } => assert_eq!(format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

mod other_commands {
    use super::*;

    #[test]
    fn cluster_settings_set() {
        let cli = Cli::parse_from_iter([
            "elastic-trib",
            "cluster",
            "settings",
            "--set",
            r#"{"transient":{}}"#,
        ]);

        match cli.command {
            Command::Cluster {
                command: ClusterCommand::Settings { get, set, file },
            } => {
                assert!(!get);
                assert_eq!(set.as_deref(), Some(r#"{"transient":{}}"#));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cluster_settings_set_and_file_conflict() {
        let result = Cli::try_parse_from_iter([
            "elastic-trib",
            "cluster",
            "settings",
            "--set",
            "{}",
            "--file",
            "settings.json",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn cluster_stats_sections_conflict() {
        let result =
            Cli::try_parse_from_iter(["elastic-trib", "cluster", "stats", "--indices", "--nodes"]);

        assert!(result.is_err());
    }

    #[test]
    fn indices_cat_with_pattern() {
        let cli = Cli::parse_from_iter(["elastic-trib", "indices", "cat", "-i", "logs-*"]);

        match cli.command {
            Command::Indices {
                command: IndicesCommand::Cat { indices, format },
            } => {
                assert_eq!(indices.as_deref(), Some("logs-*"));
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn tasks_recovery() {
        let cli = Cli::parse_from_iter(["elastic-trib", "t", "recovery", "--format", "json", "-a"]);

        assert!(matches!(
            cli.command,
            Command::Tasks {
                command: TasksCommand::Recovery {
                    format: OutputFormat::Json,
                    all: true,
                }
            }
        ));
    }

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["elastic-trib", "init"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output.to_str(), Some("elastic-trib.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cluster_settings_get_conflicts_with_set() {
        let result =
            Cli::try_parse_from_iter(["elastic-trib", "cluster", "settings", "-g", "-s", "{}"]);

        assert!(result.is_err());
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from_iter(["elastic-trib"]).is_err());
    }
}

mod index_admin {
    use super::*;

    #[test]
    fn delete_with_confirmation_flag() {
        let cli = Cli::parse_from_iter(["elastic-trib", "i", "del", "logs-2024.01", "-y"]);

        match cli.command {
            Command::Indices {
                command: IndicesCommand::Delete { indices, yes },
            } => {
                assert_eq!(indices, "logs-2024.01");
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_asks_by_default() {
        let cli = Cli::parse_from_iter(["elastic-trib", "indices", "delete", "a,b"]);

        assert!(matches!(
            cli.command,
            Command::Indices {
                command: IndicesCommand::Delete { yes: false, .. }
            }
        ));
    }

    #[test]
    fn open_requires_index_names() {
        assert!(Cli::try_parse_from_iter(["elastic-trib", "indices", "open"]).is_err());
    }

    #[test]
    fn settings_replicas_is_a_number() {
        let cli = Cli::parse_from_iter(["elastic-trib", "indices", "set", "logs", "-r", "2"]);

        match cli.command {
            Command::Indices {
                command:
                    IndicesCommand::Settings {
                        indices,
                        get,
                        set,
                        replicas,
                    },
            } => {
                assert_eq!(indices, "logs");
                assert!(!get);
                assert!(set.is_none());
                assert_eq!(replicas, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_replicas_are_rejected() {
        let result =
            Cli::try_parse_from_iter(["elastic-trib", "indices", "settings", "logs", "-r", "-1"]);

        assert!(result.is_err());
    }

    #[test]
    fn settings_get_conflicts_with_replicas() {
        let result = Cli::try_parse_from_iter([
            "elastic-trib",
            "indices",
            "settings",
            "logs",
            "--get",
            "--replicas",
            "1",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn template_alias() {
        let cli = Cli::parse_from_iter(["elastic-trib", "i", "tpl", "logs", "-g"]);

        assert!(matches!(
            cli.command,
            Command::Indices {
                command: IndicesCommand::Template { get: true, .. }
            }
        ));
    }
}

mod task_admin {
    use super::*;

    #[test]
    fn cancel_takes_id() {
        let cli = Cli::parse_from_iter(["elastic-trib", "tasks", "cancel", "--id", "node-a:42"]);

        match cli.command {
            Command::Tasks {
                command: TasksCommand::Cancel { id },
            } => assert_eq!(id, "node-a:42"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn get_requires_id() {
        assert!(Cli::try_parse_from_iter(["elastic-trib", "tasks", "get"]).is_err());
    }
}
