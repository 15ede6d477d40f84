//! Command execution against the resolved cluster.
//!
//! Resolves the connection target from the CLI options and the loaded
//! config, then hands the command to the library with a reqwest client.

use elastic_trib::commands::{self, CommandError, Session, TerminalConfirm};
use elastic_trib::config::{Cli, LoadedConfig, TargetSpec, resolve};
use elastic_trib::transport::ReqwestClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Runs the parsed command and returns its stdout output.
///
/// # Errors
///
/// Returns [`CommandError::Config`] if the target cannot be resolved, or
/// whatever the command itself fails with.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to a live cluster.
#[cfg(not(tarpaulin_include))]
pub async fn execute(cli: &Cli, config: &LoadedConfig) -> Result<String, CommandError> {
    let resolution = resolve(target_spec(cli), config)?;
    if let Some(warning) = &resolution.warning {
        tracing::warn!("{warning}");
    }
    tracing::debug!("Using cluster at {}", resolution.target.address());

    let session = Session::new(
        config,
        ReqwestClient::new(),
        resolution.target,
        command_line(std::env::args()),
    )
    .with_confirm(TerminalConfirm);

    commands::execute(&session, &cli.command).await
}

/// Extracts the target-selection options.
fn target_spec(cli: &Cli) -> TargetSpec<'_> {
    TargetSpec {
        host: cli.host.as_deref(),
        cluster: cli.cluster.as_deref(),
        http_auth: cli.http_auth.as_deref(),
    }
}

/// Short options that always take a value; the rest of a group after one of them is its value.
///
/// `-i` is left out because it is a flag on `cluster stats`; masking too
/// much is harmless.
const SHORT_WITH_VALUE: &[char] = &['A', 'H', 'c', 'o', 'f', 's', 'r'];

/// Joins the invocation into one line for the audit log.
///
/// Credentials given with `--http-auth` or `-A` are masked, including
/// inside short-option groups such as `-vA user:pass` or `-vAuser:pass`.
fn command_line(args: impl IntoIterator<Item = String>) -> String {
    let mut out = Vec::new();
    let mut mask_next = false;

    for arg in args {
        if mask_next {
            out.push("***".to_string());
            mask_next = false;
        } else if arg == "--http-auth" {
            out.push(arg);
            mask_next = true;
        } else if arg.starts_with("--http-auth=") {
            out.push("--http-auth=***".to_string());
        } else if let Some(group) = arg.strip_prefix('-').filter(|g| !g.starts_with('-')) {
            match mask_short_group(group) {
                ShortGroup::Plain => out.push(arg),
                ShortGroup::ValueNext => {
                    out.push(arg);
                    mask_next = true;
                }
                ShortGroup::ValueAttached(flags) => out.push(format!("-{flags}***")),
            }
        } else {
            out.push(arg);
        }
    }

    out.join(" ")
}

/// Where the `-A` value sits relative to a short-option group.
#[derive(Debug, PartialEq, Eq)]
enum ShortGroup<'a> {
    /// No `-A` in the group
    Plain,
    /// The group ends with `-A`; the next argument is the value
    ValueNext,
    /// The value follows `-A` in the same argument; holds the flags up to `A`
    ValueAttached(&'a str),
}

/// Walks a short-option group the way clap does: flags until the first
/// option that takes a value, whose value is the rest of the group.
fn mask_short_group(group: &str) -> ShortGroup<'_> {
    for (i, flag) in group.char_indices() {
        if !SHORT_WITH_VALUE.contains(&flag) {
            continue;
        }
        if flag != 'A' {
            return ShortGroup::Plain;
        }
        let end = i + flag.len_utf8();
        return if end == group.len() {
            ShortGroup::ValueNext
        } else {
            ShortGroup::ValueAttached(&group[..end])
        };
    }
    ShortGroup::Plain
}
