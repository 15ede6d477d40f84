//! CLI argument parsing using clap.
//!
//! Defines the global target-selection options and the
//! `resource verb` subcommand tree.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// elastic-trib: Elasticsearch cluster command line utility
///
/// For cluster/indices/nodes/tasks operations, specify the cluster alias
/// or the host:port of any working node in the cluster.
#[derive(Debug, Parser)]
#[command(name = "elastic-trib")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Host of an elastic node (host:port or URL)
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// Cluster alias looked up in the [clusters] table of the config file
    #[arg(long, short = 'c', global = true)]
    pub cluster: Option<String>,

    /// Path to configuration file (default: ./elastic-trib.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Basic authentication credentials, e.g. user:pass
    #[arg(long = "http-auth", short = 'A', global = true)]
    pub http_auth: Option<String>,

    /// Format used for log lines written to stderr
    #[arg(long = "log-format", value_enum, default_value_t, global = true)]
    pub log_format: LogFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Top-level subcommands, one per resource.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "elastic-trib.toml")]
        output: PathBuf,
    },

    /// Elastic cluster operations
    #[command(alias = "c")]
    Cluster {
        #[command(subcommand)]
        command: ClusterCommand,
    },

    /// Elastic nodes operations
    #[command(alias = "n")]
    Nodes {
        #[command(subcommand)]
        command: NodesCommand,
    },

    /// Elastic indices operations
    #[command(alias = "i")]
    Indices {
        #[command(subcommand)]
        command: IndicesCommand,
    },

    /// Elastic tasks operations
    #[command(alias = "t")]
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClusterCommand {
    /// Display the health status of the cluster
    #[command(alias = "h")]
    Health,

    /// Display the state of the cluster
    #[command(alias = "s")]
    State,

    /// Display the stats of the cluster
    Stats {
        /// Only show the indices section
        #[arg(long, short, conflicts_with = "nodes")]
        indices: bool,

        /// Only show the nodes section
        #[arg(long, short)]
        nodes: bool,
    },

    /// Display the elected master node
    #[command(alias = "m")]
    Master {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Get or set the cluster settings
    ///
    /// Without --set or --file the current settings are printed.
    #[command(alias = "set")]
    Settings {
        /// Print the current settings
        #[arg(long, short, conflicts_with_all = ["set", "file"])]
        get: bool,

        /// Settings document to PUT, as a JSON object
        #[arg(long, short, conflicts_with = "file")]
        set: Option<String>,

        /// Read the settings document from a file ('-' for stdin)
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// List the cluster aliases from the config file
    #[command(alias = "l")]
    List,
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// Display the nodes of the cluster
    #[command(alias = "c")]
    Cat {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Display the custom attributes of every node
    #[command(alias = "attr")]
    Attrs {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Display disk allocation per node
    #[command(alias = "alloc")]
    Allocation {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Display detailed node info
    Info,

    /// Exclude hosts from shard allocation
    ///
    /// Reads the current exclusion list, adds the given IPs and writes the
    /// whole list back. A concurrent writer between the read and the write
    /// is silently overwritten.
    #[command(alias = "e")]
    Exclude {
        /// Comma-separated IP list, e.g. 10.0.0.1,10.0.0.2
        #[arg(value_name = "IP1,IP2")]
        ips: Option<String>,
    },

    /// Return hosts to shard allocation
    ///
    /// Removes the given IPs from the exclusion list and writes the whole
    /// list back. IPs that are not excluded are ignored.
    #[command(alias = "i")]
    Include {
        /// Comma-separated IP list, e.g. 10.0.0.1,10.0.0.2
        #[arg(value_name = "IP1,IP2")]
        ips: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum IndicesCommand {
    /// Display the indices of the cluster
    Cat {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Index names or patterns, e.g. logs-* or index1,index2
        #[arg(long, short)]
        indices: Option<String>,
    },

    /// List the index names of the cluster
    List,

    /// Display the shards of the cluster
    #[command(alias = "s")]
    Shards {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Index names or patterns, e.g. logs-* or index1,index2
        #[arg(long, short)]
        indices: Option<String>,
    },

    /// Display the index aliases
    Alias {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Alias names or patterns, e.g. alias1,alias2
        #[arg(long)]
        alias: Option<String>,
    },

    /// Open closed indices
    Open {
        #[arg(value_name = "INDEX1,INDEX2")]
        indices: String,
    },

    /// Close indices
    Close {
        #[arg(value_name = "INDEX1,INDEX2")]
        indices: String,
    },

    /// Delete indices
    ///
    /// Asks for confirmation on the terminal unless --yes is given.
    #[command(alias = "del")]
    Delete {
        #[arg(value_name = "INDEX1,INDEX2")]
        indices: String,

        /// Delete without asking
        #[arg(long, short)]
        yes: bool,
    },

    /// Get or set index settings
    #[command(alias = "set")]
    Settings {
        #[arg(value_name = "INDEX1,INDEX2")]
        indices: String,

        /// Print the settings of the indices
        #[arg(long, short, conflicts_with_all = ["set", "replicas"])]
        get: bool,

        /// Settings document to PUT, as a JSON object
        #[arg(long, short, conflicts_with = "replicas")]
        set: Option<String>,

        /// Set index.number_of_replicas
        #[arg(long, short)]
        replicas: Option<u32>,
    },

    /// Get or set index templates
    #[command(alias = "tpl")]
    Template {
        #[arg(value_name = "TPL1,TPL2")]
        names: String,

        /// Print the templates
        #[arg(long, short, conflicts_with = "set")]
        get: bool,

        /// Template document to PUT under a single name, as a JSON object
        #[arg(long, short)]
        set: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List the running tasks
    #[command(alias = "l")]
    List,

    /// Display one task
    #[command(alias = "g")]
    Get {
        /// Task id, e.g. oTUltX4IQMOUUVeiohTt8A:12345
        #[arg(long)]
        id: String,
    },

    /// Cancel a running task
    #[command(alias = "c")]
    Cancel {
        /// Task id, e.g. oTUltX4IQMOUUVeiohTt8A:12345
        #[arg(long)]
        id: String,
    },

    /// List the pending cluster tasks
    #[command(alias = "p")]
    Pending,

    /// Display shard recoveries
    #[command(alias = "r")]
    Recovery {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Also show recoveries that are done
        #[arg(long, short)]
        all: bool,
    },
}

/// Output format for tabular listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Column-aligned table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
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

    /// Parses CLI arguments from an iterator, returning clap's error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or malformed arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
