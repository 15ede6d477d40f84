//! Set algebra over shard-allocation exclusion lists.
//!
//! Everything here is pure: no I/O, and inputs are never mutated.

use std::collections::HashSet;
use std::net::IpAddr;

use super::InvalidIpError;

/// Ordered list of IP strings with set semantics.
///
/// Entries are trimmed, non-empty and unique; order is the order of first
/// occurrence and carries no meaning for the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: Vec<String>,
}

impl ExclusionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a set from raw entries, trimming and deduplicating them.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: dedup(entries),
        }
    }

    /// Parses the comma-separated form stored in the cluster settings.
    #[must_use]
    pub fn parse_setting(value: &str) -> Self {
        Self::from_entries(value.split(','))
    }

    /// Renders the comma-separated form written back to the cluster settings.
    ///
    /// An empty set renders as an empty string, which clears the exclusion.
    #[must_use]
    pub fn to_setting(&self) -> String {
        self.entries.join(",")
    }

    /// Returns the entries in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Returns true if `ip` is an entry (exact string match after trimming).
    #[must_use]
    pub fn contains(&self, ip: &str) -> bool {
        let ip = ip.trim();
        self.entries.iter().any(|e| e == ip)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Caller-supplied IPs to add to or remove from the exclusion set.
///
/// Entries are kept raw until [`Delta::validate`] (or an edit) checks them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    entries: Vec<String>,
}

impl Delta {
    /// Splits a comma-separated command-line argument.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::from_entries(list.split(','))
    }

    /// Wraps raw entries without validating them.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Trimmed, non-blank entries in order.
    pub fn normalized(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty())
    }

    /// Checks every non-blank entry is an IPv4 or IPv6 literal.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpError`] naming the first entry that is not.
    pub fn validate(&self) -> Result<(), InvalidIpError> {
        match self.normalized().find(|e| e.parse::<IpAddr>().is_err()) {
            Some(bad) => Err(InvalidIpError {
                value: bad.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns true if the delta has no non-blank entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized().next().is_none()
    }
}

/// Trims entries, drops blanks, and keeps the first occurrence of each value.
///
/// Idempotent: `dedup(dedup(x)) == dedup(x)`.
#[must_use]
pub fn dedup<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for entry in entries {
        let value = entry.as_ref().trim();
        if value.is_empty() || seen.contains(value) {
            continue;
        }
        seen.insert(value.to_string());
        result.push(value.to_string());
    }

    result
}

/// Adds `delta` to `current`.
///
/// Existing entries keep their positions; new ones are appended in delta order.
///
/// # Errors
///
/// Returns [`InvalidIpError`] if any delta entry is not an IP literal; the
/// whole delta is rejected.
pub fn exclude(delta: &Delta, current: &ExclusionSet) -> Result<ExclusionSet, InvalidIpError> {
    delta.validate()?;

    Ok(ExclusionSet::from_entries(
        current.iter().chain(delta.normalized()),
    ))
}

/// Removes every entry of `current` that exactly matches a delta entry.
///
/// No address canonicalization is done: `::1` and `0:0:0:0:0:0:0:1` are
/// different entries. Delta entries not in `current` are ignored.
///
/// # Errors
///
/// Returns [`InvalidIpError`] if any delta entry is not an IP literal.
pub fn include(delta: &Delta, current: &ExclusionSet) -> Result<ExclusionSet, InvalidIpError> {
    delta.validate()?;

    let removed: HashSet<&str> = delta.normalized().collect();
    Ok(ExclusionSet::from_entries(
        current.iter().filter(|ip| !removed.contains(ip)),
    ))
}

/// Delta entries that [`include`] would ignore because `current` lacks them.
#[must_use]
pub fn unmatched<'a>(delta: &'a Delta, current: &ExclusionSet) -> Vec<&'a str> {
    delta.normalized().filter(|ip| !current.contains(ip)).collect()
}
