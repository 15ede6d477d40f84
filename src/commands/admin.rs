//! Index and task administration.
//!
//! Every handler here that changes the cluster validates its input, then
//! writes the audit record, then sends exactly one request.

use serde_json::{Value, json};
use url::form_urlencoded;

use crate::transport::HttpClient;

use super::catalog::target_list;
use super::{CommandError, Resource, Session, UsageError, audit, endpoint, parse_settings, render};

/// Index state change sent to `<indices>/_open` or `<indices>/_close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Open,
    Close,
}

impl IndexState {
    const fn command(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::Open => "_open",
            Self::Close => "_close",
        }
    }
}

/// What `indices settings` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction<'a> {
    Get,
    Set(&'a str),
    Replicas(u32),
}

impl<'a> SettingsAction<'a> {
    /// Picks the action from the command line flags.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MissingAction`] when no flag was given.
    pub fn from_flags(
        command: &'static str,
        options: &'static str,
        get: bool,
        set: Option<&'a str>,
        replicas: Option<u32>,
    ) -> Result<Self, UsageError> {
        match (get, set, replicas) {
            (true, _, _) => Ok(Self::Get),
            (false, Some(text), _) => Ok(Self::Set(text)),
            (false, None, Some(count)) => Ok(Self::Replicas(count)),
            (false, None, None) => Err(UsageError::MissingAction { command, options }),
        }
    }
}

/// Prints the sorted index names.
pub async fn index_names<H: HttpClient>(session: &Session<'_, H>) -> Result<String, CommandError> {
    let path = endpoint(Resource::Indices, "list")?.request_path(None)?;
    let rows: Vec<Value> = session.rest().get_json(&path).await?;

    let mut names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("index").and_then(Value::as_str))
        .collect();
    names.sort_unstable();
    Ok(render::pretty_json(&names))
}

pub async fn set_index_state<H: HttpClient>(
    session: &Session<'_, H>,
    indices: &str,
    state: IndexState,
) -> Result<String, CommandError> {
    let targets = required_targets(indices, state.command())?;

    audit(session).await?;

    let path = format!("{targets}/{}", state.action());
    let ack: Value = session.rest().post_json(&path, None).await?;
    Ok(render::pretty_json(&ack))
}

/// Deletes indices after the operator confirms, unless `confirmed` is already set.
pub async fn delete_indices<H: HttpClient>(
    session: &Session<'_, H>,
    indices: &str,
    confirmed: bool,
) -> Result<String, CommandError> {
    let targets = required_targets(indices, "delete")?;

    if !confirmed {
        let names: Vec<&str> = indices
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        let question = format!(
            "[Attention] Delete below indices? type (yes) to confirm delete.\n{}",
            names.join(" ")
        );
        let accepted = session
            .confirm
            .as_ref()
            .is_some_and(|confirm| confirm.confirm(&question));
        if !accepted {
            return Err(UsageError::Aborted { command: "delete" }.into());
        }
    }

    audit(session).await?;

    let ack: Value = session.rest().delete_json(&targets).await?;
    Ok(render::pretty_json(&ack))
}

pub async fn index_settings<H: HttpClient>(
    session: &Session<'_, H>,
    indices: &str,
    action: SettingsAction<'_>,
) -> Result<String, CommandError> {
    let targets = required_targets(indices, "settings")?;
    let path = format!("{targets}/_settings");

    let document = match action {
        SettingsAction::Get => {
            let body: Value = session
                .rest()
                .get_json(&format!("{path}?flat_settings=true"))
                .await?;
            return Ok(render::pretty_json(&body));
        }
        SettingsAction::Set(text) => parse_settings(text)?,
        SettingsAction::Replicas(count) => {
            json!({ "index.number_of_replicas": count.to_string() })
        }
    };

    audit(session).await?;

    let ack: Value = session
        .rest()
        .put_json(&path, document.to_string().into_bytes())
        .await?;
    Ok(render::pretty_json(&ack))
}

/// Prints templates, or PUTs `set` as the body of a single template.
pub async fn template<H: HttpClient>(
    session: &Session<'_, H>,
    names: &str,
    set: Option<&str>,
) -> Result<String, CommandError> {
    let targets = required_targets(names, "template")?;

    let Some(text) = set else {
        let body: Value = session
            .rest()
            .get_json(&format!("_template/{targets}?flat_settings=true"))
            .await?;
        return Ok(render::pretty_json(&body));
    };

    if targets.contains(',') {
        return Err(UsageError::SingleTarget {
            command: "template --set",
        }
        .into());
    }
    let document = parse_settings(text)?;

    audit(session).await?;

    let ack: Value = session
        .rest()
        .put_json(&format!("_template/{targets}"), document.to_string().into_bytes())
        .await?;
    Ok(render::pretty_json(&ack))
}

pub async fn task<H: HttpClient>(
    session: &Session<'_, H>,
    id: &str,
) -> Result<String, CommandError> {
    let path = format!("_tasks/{}", task_id(id)?);
    let body: Value = session.rest().get_json(&path).await?;
    Ok(render::pretty_json(&body))
}

pub async fn cancel_task<H: HttpClient>(
    session: &Session<'_, H>,
    id: &str,
) -> Result<String, CommandError> {
    let path = format!("_tasks/{}/_cancel", task_id(id)?);

    audit(session).await?;

    let body: Value = session.rest().post_json(&path, None).await?;
    Ok(render::pretty_json(&body))
}

fn required_targets(pattern: &str, command: &'static str) -> Result<String, UsageError> {
    target_list(pattern)?.ok_or(UsageError::MissingTargets { command })
}

/// Checks `<node>:<number>` and encodes the node id for the path.
fn task_id(raw: &str) -> Result<String, UsageError> {
    let invalid = || UsageError::InvalidTaskId { id: raw.to_string() };

    let (node, number) = raw.trim().split_once(':').ok_or_else(invalid)?;
    if node.is_empty() || number.parse::<u64>().is_err() {
        return Err(invalid());
    }

    let node: String = form_urlencoded::byte_serialize(node.as_bytes()).collect();
    Ok(format!("{node}:{number}"))
}
