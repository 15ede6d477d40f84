//! Command execution.
//!
//! [`execute`] turns a parsed [`Command`] into requests against one
//! cluster and returns the text to print on stdout. Read-only commands are
//! looked up in the [`catalog`]. Commands that change the cluster are
//! audited before their request is sent; `indices delete` also asks for
//! confirmation.

mod admin;
pub mod catalog;
mod confirm;
mod error;
pub mod render;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use catalog::{CATALOG, Endpoint, Resource, lookup, target_list};
pub use confirm::{Confirm, TerminalConfirm, is_yes};
pub use error::{CommandError, FailureKind, UsageError};

use std::path::Path;

use serde_json::Value;

use self::admin::{IndexState, SettingsAction};
use crate::allocation::{self, Delta, Operation, SettingsGateway};
use crate::audit::{FileAuditLog, OperationRecord};
use crate::config::{
    ClusterCommand, Command, ConnectionTarget, IndicesCommand, LoadedConfig, NodesCommand,
    OutputFormat, TasksCommand, expand_tilde, write_default_config,
};
use crate::transport::{HttpClient, RestClient, TransportError};

/// Recovery stage hidden from tables unless `--all` is given.
const RECOVERY_DONE: &str = "done";

/// Everything a command needs to run against one cluster.
#[derive(Debug)]
pub struct Session<'a, H> {
    config: &'a LoadedConfig,
    client: H,
    target: ConnectionTarget,
    audit: Option<FileAuditLog>,
    confirm: Option<Box<dyn Confirm>>,
    command_line: String,
}

impl<'a, H> Session<'a, H> {
    /// Creates a session. The audit log is taken from `config`.
    #[must_use]
    pub fn new(
        config: &'a LoadedConfig,
        client: H,
        target: ConnectionTarget,
        command_line: impl Into<String>,
    ) -> Self {
        let audit = config
            .toml
            .audit_log
            .as_deref()
            .map(|path| FileAuditLog::new(expand_tilde(path)));

        Self {
            config,
            client,
            target,
            audit,
            confirm: None,
            command_line: command_line.into(),
        }
    }

    /// Sets how destructive commands ask for confirmation.
    ///
    /// Without one, they are refused unless confirmed on the command line.
    #[must_use]
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Some(Box::new(confirm));
        self
    }

    /// Returns the connection target.
    #[must_use]
    pub const fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    fn rest(&self) -> RestClient<&H> {
        RestClient::new(&self.client, self.target.clone())
    }
}

/// Writes the configuration template to `output`.
///
/// # Errors
///
/// Returns [`CommandError::Config`] if the file cannot be written.
pub fn init(output: &Path) -> Result<String, CommandError> {
    write_default_config(output)?;
    Ok(format!(
        "Configuration template written to: {}\n",
        output.display()
    ))
}

/// Lists the configured cluster aliases, sorted by name.
#[must_use]
pub fn list_clusters(config: &LoadedConfig) -> String {
    let rows: Vec<Value> = config
        .clusters()
        .map(|(name, address)| serde_json::json!({ "name": name, "address": address }))
        .collect();

    if rows.is_empty() {
        return format!("No clusters configured ({config})\n");
    }
    render::table(&["name", "address"], &rows)
}

/// Runs one command and returns its output.
///
/// # Errors
///
/// Returns [`CommandError`]; see [`CommandError::kind`] for how each
/// variant is reported.
pub async fn execute<H: HttpClient>(
    session: &Session<'_, H>,
    command: &Command,
) -> Result<String, CommandError> {
    match command {
        Command::Init { output } => init(output),
        Command::Cluster { command } => cluster(session, command).await,
        Command::Nodes { command } => nodes(session, command).await,
        Command::Indices { command } => indices(session, command).await,
        Command::Tasks { command } => tasks(session, command).await,
    }
}

async fn cluster<H: HttpClient>(
    session: &Session<'_, H>,
    command: &ClusterCommand,
) -> Result<String, CommandError> {
    match command {
        ClusterCommand::Health => show(session, Resource::Cluster, "health").await,
        ClusterCommand::State => show(session, Resource::Cluster, "state").await,
        ClusterCommand::Stats { indices, nodes } => {
            let endpoint = endpoint(Resource::Cluster, "stats")?;
            let stats: Value = session.rest().get_json(&endpoint.request_path(None)?).await?;
            let section = match (*indices, *nodes) {
                (true, _) => stats.get("indices"),
                (_, true) => stats.get("nodes"),
                _ => Some(&stats),
            };
            Ok(render::pretty_json(section.unwrap_or(&Value::Null)))
        }
        ClusterCommand::Master { format } => {
            listing(session, Resource::Cluster, "master", None, *format, false).await
        }
        ClusterCommand::Settings { get, set, file } => {
            let document = match (set, file) {
                (Some(text), _) if !get => parse_settings(text)?,
                (None, Some(path)) if !get => parse_settings(&read_settings(path)?)?,
                _ => return show(session, Resource::Cluster, "settings").await,
            };
            audit(session).await?;
            let gateway = SettingsGateway::new(session.rest());
            let ack = gateway.put_settings(&document).await?;
            Ok(render::pretty_json(&ack))
        }
        ClusterCommand::List => Ok(list_clusters(session.config)),
    }
}

async fn nodes<H: HttpClient>(
    session: &Session<'_, H>,
    command: &NodesCommand,
) -> Result<String, CommandError> {
    match command {
        NodesCommand::Cat { format } => {
            listing(session, Resource::Nodes, "cat", None, *format, false).await
        }
        NodesCommand::Attrs { format } => {
            listing(session, Resource::Nodes, "attrs", None, *format, false).await
        }
        NodesCommand::Allocation { format } => {
            listing(session, Resource::Nodes, "allocation", None, *format, false).await
        }
        NodesCommand::Info => show(session, Resource::Nodes, "info").await,
        NodesCommand::Exclude { ips } => {
            edit_exclusions(session, Operation::Exclude, ips.as_deref()).await
        }
        NodesCommand::Include { ips } => {
            edit_exclusions(session, Operation::Include, ips.as_deref()).await
        }
    }
}

async fn indices<H: HttpClient>(
    session: &Session<'_, H>,
    command: &IndicesCommand,
) -> Result<String, CommandError> {
    match command {
        IndicesCommand::Cat { format, indices } => {
            listing(session, Resource::Indices, "cat", indices.as_deref(), *format, false).await
        }
        IndicesCommand::List => admin::index_names(session).await,
        IndicesCommand::Shards { format, indices } => {
            listing(session, Resource::Indices, "shards", indices.as_deref(), *format, false)
                .await
        }
        IndicesCommand::Alias { format, alias } => {
            listing(session, Resource::Indices, "alias", alias.as_deref(), *format, false).await
        }
        IndicesCommand::Open { indices } => {
            admin::set_index_state(session, indices, IndexState::Open).await
        }
        IndicesCommand::Close { indices } => {
            admin::set_index_state(session, indices, IndexState::Close).await
        }
        IndicesCommand::Delete { indices, yes } => {
            admin::delete_indices(session, indices, *yes).await
        }
        IndicesCommand::Settings {
            indices,
            get,
            set,
            replicas,
        } => {
            let action = SettingsAction::from_flags(
                "indices settings",
                "--get, --set or --replicas",
                *get,
                set.as_deref(),
                *replicas,
            )?;
            admin::index_settings(session, indices, action).await
        }
        IndicesCommand::Template { names, get, set } => {
            if !get && set.is_none() {
                return Err(UsageError::MissingAction {
                    command: "indices template",
                    options: "--get or --set",
                }
                .into());
            }
            admin::template(session, names, set.as_deref()).await
        }
    }
}

async fn tasks<H: HttpClient>(
    session: &Session<'_, H>,
    command: &TasksCommand,
) -> Result<String, CommandError> {
    match command {
        TasksCommand::List => show(session, Resource::Tasks, "list").await,
        TasksCommand::Get { id } => admin::task(session, id).await,
        TasksCommand::Cancel { id } => admin::cancel_task(session, id).await,
        TasksCommand::Pending => show(session, Resource::Tasks, "pending").await,
        TasksCommand::Recovery { format, all } => {
            listing(session, Resource::Tasks, "recovery", None, *format, !*all).await
        }
    }
}

fn endpoint(resource: Resource, verb: &str) -> Result<&'static Endpoint, CommandError> {
    lookup(resource, verb).ok_or_else(|| {
        CommandError::Usage(UsageError::UnknownCommand {
            resource,
            verb: verb.to_string(),
        })
    })
}

/// Fetches a JSON endpoint and pretty-prints it.
async fn show<H: HttpClient>(
    session: &Session<'_, H>,
    resource: Resource,
    verb: &str,
) -> Result<String, CommandError> {
    let endpoint = endpoint(resource, verb)?;
    let body: Value = session.rest().get_json(&endpoint.request_path(None)?).await?;
    Ok(render::pretty_json(&body))
}

/// Fetches a `_cat` endpoint and renders it in the requested format.
async fn listing<H: HttpClient>(
    session: &Session<'_, H>,
    resource: Resource,
    verb: &str,
    pattern: Option<&str>,
    format: OutputFormat,
    hide_done: bool,
) -> Result<String, CommandError> {
    let endpoint = endpoint(resource, verb)?;
    let path = endpoint.request_path(pattern)?;
    let body: Value = session.rest().get_json(&path).await?;

    let Some(rows) = body.as_array() else {
        return Err(TransportError::Schema {
            url: path,
            reason: "expected a JSON array".to_string(),
        }
        .into());
    };

    match (format, endpoint.columns) {
        (OutputFormat::Text, Some(columns)) => {
            let visible = rows.iter().filter(|row| {
                !hide_done || row.get("stage").and_then(Value::as_str) != Some(RECOVERY_DONE)
            });
            Ok(render::table(columns, visible))
        }
        _ => Ok(render::pretty_json(&body)),
    }
}

async fn edit_exclusions<H: HttpClient>(
    session: &Session<'_, H>,
    operation: Operation,
    ips: Option<&str>,
) -> Result<String, CommandError> {
    let delta = Delta::parse(ips.unwrap_or_default());
    if delta.is_empty() {
        return Err(UsageError::MissingIpList {
            command: match operation {
                Operation::Exclude => "exclude",
                Operation::Include => "include",
            },
        }
        .into());
    }
    delta.validate()?;

    audit(session).await?;

    let gateway = SettingsGateway::new(session.rest());
    let outcome = allocation::run(&gateway, operation, &delta).await?;
    Ok(render::pretty_json(&outcome.acknowledgement))
}

async fn audit<H>(session: &Session<'_, H>) -> Result<(), CommandError> {
    let Some(log) = &session.audit else {
        return Ok(());
    };

    let record = OperationRecord::now(session.command_line.as_str());
    log.record(&record).await?;
    tracing::debug!("Audit record appended to {}", log.path().display());
    Ok(())
}

/// Parses a settings document, which must be a JSON object.
fn parse_settings(text: &str) -> Result<Value, UsageError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| UsageError::NotJsonObject {
            reason: e.to_string(),
        })?;

    if !document.is_object() {
        return Err(UsageError::NotJsonObject {
            reason: format!("got {document}"),
        });
    }
    Ok(document)
}

/// Reads a settings document from `path`, or from stdin for `-`.
fn read_settings(path: &Path) -> Result<String, UsageError> {
    let result = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(expand_tilde(path))
    };

    result.map_err(|source| UsageError::SettingsFile {
        path: path.to_path_buf(),
        source,
    })
}
