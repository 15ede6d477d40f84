//! Static table of the read-only endpoints.
//!
//! Each read-only leaf of the CLI is one row: a resource, a verb, the API
//! path and, for `_cat` APIs, the columns shown in text output. Write
//! commands build their paths from [`target_list`].

use std::fmt;

use url::form_urlencoded;

use super::UsageError;

/// The resource a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cluster,
    Nodes,
    Indices,
    Tasks,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cluster => "cluster",
            Self::Nodes => "nodes",
            Self::Indices => "indices",
            Self::Tasks => "tasks",
        };
        f.write_str(name)
    }
}

/// A read-only API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub resource: Resource,
    pub verb: &'static str,
    /// API path relative to the cluster address, without query
    pub path: &'static str,
    /// Columns for `_cat` APIs, `None` for JSON APIs
    pub columns: Option<&'static [&'static str]>,
}

const MASTER_COLUMNS: &[&str] = &["id", "host", "ip", "node"];

const NODES_COLUMNS: &[&str] = &[
    "ip",
    "heap.percent",
    "ram.percent",
    "cpu",
    "load_1m",
    "node.role",
    "master",
    "name",
];

const NODEATTRS_COLUMNS: &[&str] = &["node", "host", "ip", "attr", "value"];

const ALLOCATION_COLUMNS: &[&str] = &[
    "shards",
    "disk.indices",
    "disk.used",
    "disk.avail",
    "disk.total",
    "disk.percent",
    "host",
    "ip",
    "node",
];

const INDICES_COLUMNS: &[&str] = &[
    "health",
    "status",
    "index",
    "uuid",
    "pri",
    "rep",
    "docs.count",
    "docs.deleted",
    "store.size",
    "pri.store.size",
];

const INDEX_NAME_COLUMNS: &[&str] = &["index"];

const ALIAS_COLUMNS: &[&str] = &[
    "alias",
    "index",
    "filter",
    "routing.index",
    "routing.search",
];

const SHARDS_COLUMNS: &[&str] = &[
    "index", "shard", "prirep", "state", "docs", "store", "ip", "node",
];

const RECOVERY_COLUMNS: &[&str] = &[
    "index",
    "shard",
    "time",
    "type",
    "stage",
    "source_host",
    "target_host",
    "repository",
    "snapshot",
    "files",
    "files_percent",
    "bytes",
    "bytes_percent",
    "translog_ops",
    "translog_ops_percent",
];

const fn json(resource: Resource, verb: &'static str, path: &'static str) -> Endpoint {
    Endpoint {
        resource,
        verb,
        path,
        columns: None,
    }
}

const fn cat(
    resource: Resource,
    verb: &'static str,
    path: &'static str,
    columns: &'static [&'static str],
) -> Endpoint {
    Endpoint {
        resource,
        verb,
        path,
        columns: Some(columns),
    }
}

/// Every read-only endpoint, keyed by resource and verb.
pub const CATALOG: &[Endpoint] = &[
    json(Resource::Cluster, "health", "_cluster/health"),
    json(Resource::Cluster, "state", "_cluster/state"),
    json(Resource::Cluster, "stats", "_cluster/stats"),
    cat(Resource::Cluster, "master", "_cat/master", MASTER_COLUMNS),
    json(Resource::Cluster, "settings", "_cluster/settings"),
    cat(Resource::Nodes, "cat", "_cat/nodes", NODES_COLUMNS),
    cat(Resource::Nodes, "attrs", "_cat/nodeattrs", NODEATTRS_COLUMNS),
    cat(Resource::Nodes, "allocation", "_cat/allocation", ALLOCATION_COLUMNS),
    json(Resource::Nodes, "info", "_nodes"),
    cat(Resource::Indices, "cat", "_cat/indices", INDICES_COLUMNS),
    cat(Resource::Indices, "shards", "_cat/shards", SHARDS_COLUMNS),
    cat(Resource::Indices, "list", "_cat/indices", INDEX_NAME_COLUMNS),
    cat(Resource::Indices, "alias", "_cat/aliases", ALIAS_COLUMNS),
    json(Resource::Tasks, "list", "_tasks"),
    json(Resource::Tasks, "pending", "_cluster/pending_tasks"),
    cat(Resource::Tasks, "recovery", "_cat/recovery", RECOVERY_COLUMNS),
];

/// Finds the endpoint for `resource verb`.
#[must_use]
pub fn lookup(resource: Resource, verb: &str) -> Option<&'static Endpoint> {
    CATALOG
        .iter()
        .find(|e| e.resource == resource && e.verb == verb)
}

impl Endpoint {
    /// Builds the request path.
    ///
    /// `pattern` is a comma-separated list of index names or patterns,
    /// appended as a path segment. `_cat` APIs get `format=json` and an
    /// explicit column list so the response keys match [`Self::columns`];
    /// the cluster settings API gets `flat_settings=true`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidTarget`] for a `.` or `..` entry.
    pub fn request_path(&self, pattern: Option<&str>) -> Result<String, UsageError> {
        let mut path = self.path.to_string();

        if let Some(targets) = pattern.map(target_list).transpose()?.flatten() {
            path.push('/');
            path.push_str(&targets);
        }

        match self.columns {
            Some(columns) => {
                path.push_str("?format=json&h=");
                path.push_str(&columns.join(","));
            }
            None if self.path == "_cluster/settings" => path.push_str("?flat_settings=true"),
            None => {}
        }

        Ok(path)
    }
}

/// Encodes a comma-separated list of names as one path segment.
///
/// Entries are trimmed and blanks dropped; each entry is percent-encoded
/// except for `*`, so wildcards pass through. Returns `None` when nothing
/// is left.
///
/// # Errors
///
/// Returns [`UsageError::InvalidTarget`] for a `.` or `..` entry, which
/// would otherwise address the parent path.
pub fn target_list(pattern: &str) -> Result<Option<String>, UsageError> {
    let mut encoded = Vec::new();
    for target in pattern.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if matches!(target, "." | "..") {
            return Err(UsageError::InvalidTarget {
                target: target.to_string(),
            });
        }
        // form encoding writes spaces as '+', which a path would keep literally
        let segment: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        encoded.push(segment.replace('+', "%20"));
    }

    Ok((!encoded.is_empty()).then(|| encoded.join(",")))
}
