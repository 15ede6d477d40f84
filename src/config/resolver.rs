//! Resolution of the cluster to talk to.
//!
//! Priority (highest to lowest):
//!
//! 1. **`--host`** - explicit node address
//! 2. **`--cluster`** - alias looked up in the `[clusters]` table
//! 3. **Built-in default** - `http://127.0.0.1:9200`
//!
//! Credentials come from `--http-auth`, falling back to `http_auth` in the
//! config file. A malformed credential string is not fatal: it is reported
//! as an [`AuthWarning`] and the request goes out unauthenticated.

use std::fmt;

use thiserror::Error;
use url::Url;

use super::defaults;
use super::error::ConfigError;
use super::loaded::LoadedConfig;

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name
    pub user: String,
    /// Password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Splits a `user:pass` string.
    ///
    /// Returns `None` unless the string contains exactly one `:`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(password), None) => Some(Self {
                user: user.to_string(),
                password: password.to_string(),
            }),
            _ => None,
        }
    }
}

/// Where and how to connect, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    address: Url,
    credentials: Option<Credentials>,
}

impl ConnectionTarget {
    /// Creates a target from a parsed base URL.
    ///
    /// The URL path is normalized to end with `/` so that relative API
    /// paths are appended rather than replacing the last segment.
    #[must_use]
    pub fn new(mut address: Url, credentials: Option<Credentials>) -> Self {
        if !address.path().ends_with('/') {
            let path = format!("{}/", address.path());
            address.set_path(&path);
        }
        Self {
            address,
            credentials,
        }
    }

    /// Base URL of the cluster.
    #[must_use]
    pub const fn address(&self) -> &Url {
        &self.address
    }

    /// Credentials attached to every request, if any.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Non-fatal problem with the supplied credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Set basic auth failed: expected 'user:pass', got {parts} ':'-separated part(s); continuing unauthenticated")]
pub struct AuthWarning {
    /// Number of `:`-separated parts found in the credential string
    pub parts: usize,
}

/// Output of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The connection target to use
    pub target: ConnectionTarget,
    /// Set when credentials were supplied but could not be used
    pub warning: Option<AuthWarning>,
}

/// Target selection options as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetSpec<'a> {
    /// `--host`
    pub host: Option<&'a str>,
    /// `--cluster`
    pub cluster: Option<&'a str>,
    /// `--http-auth`
    pub http_auth: Option<&'a str>,
}

/// Resolves the command line target options against the loaded configuration.
///
/// Does no I/O beyond reading the already-loaded config.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCluster`] when the alias is not configured
/// and [`ConfigError::InvalidAddress`] when the address is not a base URL.
pub fn resolve(spec: TargetSpec<'_>, config: &LoadedConfig) -> Result<Resolution, ConfigError> {
    let address = resolve_address(spec, config)?;

    let raw_auth = spec
        .http_auth
        .or(config.toml.http_auth.as_deref())
        .filter(|s| !s.is_empty());

    let (credentials, warning) = match raw_auth {
        None => (None, None),
        Some(raw) => match Credentials::parse(raw) {
            Some(credentials) => (Some(credentials), None),
            None => (
                None,
                Some(AuthWarning {
                    parts: raw.split(':').count(),
                }),
            ),
        },
    };

    Ok(Resolution {
        target: ConnectionTarget::new(address, credentials),
        warning,
    })
}

fn resolve_address(spec: TargetSpec<'_>, config: &LoadedConfig) -> Result<Url, ConfigError> {
    let raw = match (spec.host.filter(|h| !h.is_empty()), spec.cluster) {
        (Some(host), _) => host,
        (None, Some(name)) if !name.is_empty() => config
            .toml
            .cluster_address(name)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ConfigError::UnknownCluster {
                name: name.to_string(),
                source_name: config.to_string(),
            })?,
        _ => defaults::ADDRESS,
    };

    parse_address(raw)
}

/// Parses an address, prepending `http://` when no scheme is present.
///
/// Only a `://` separator marks a scheme, so host names such as
/// `httpd-es01` are not mistaken for one.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAddress`] when the result is not a base URL.
pub fn parse_address(raw: &str) -> Result<Url, ConfigError> {
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("{}://{raw}", defaults::SCHEME)
    };

    let url = Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidAddress {
        address: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidAddress {
            address: raw.to_string(),
            reason: "expected an http or https URL".to_string(),
        });
    }

    Ok(url)
}

