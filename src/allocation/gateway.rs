//! Reading and writing the cluster's persistent settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transport::{HttpClient, RestClient, TransportError};

use super::payload::{EXCLUDE_IP_KEY, PayloadBuilder};
use super::{AllocationError, ExclusionSet};

/// Path of the cluster settings API, with flattened keys.
pub const SETTINGS_PATH: &str = "_cluster/settings?flat_settings=true";

/// Cluster settings as returned by `GET _cluster/settings?flat_settings=true`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SettingsDocument {
    /// Settings that survive a full cluster restart
    #[serde(default)]
    pub persistent: Map<String, Value>,

    /// Settings cleared on a full cluster restart
    #[serde(default)]
    pub transient: Map<String, Value>,
}

impl SettingsDocument {
    /// Returns the persistent allocation exclusion list, if set.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the key holds something
    /// other than a string.
    pub fn excluded_ips(&self) -> Result<Option<&str>, String> {
        match self.persistent.get(EXCLUDE_IP_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(ips)) => Ok(Some(ips)),
            Some(other) => Err(format!("'{EXCLUDE_IP_KEY}' is not a string: {other}")),
        }
    }
}

/// Response to a settings write.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Acknowledgement {
    /// Whether the master acknowledged the update
    pub acknowledged: bool,

    /// Persistent settings echoed by the server
    #[serde(default)]
    pub persistent: Map<String, Value>,

    /// Transient settings echoed by the server
    #[serde(default)]
    pub transient: Map<String, Value>,
}

/// The two remote operations behind `nodes exclude` and `nodes include`.
///
/// # Concurrency
///
/// Nothing is locked between [`fetch_exclusion_ips`](Self::fetch_exclusion_ips)
/// and [`persist_exclusion_ips`](Self::persist_exclusion_ips). Any other
/// write to the settings in between is overwritten by the persist: last
/// writer wins.
#[derive(Debug)]
pub struct SettingsGateway<H> {
    rest: RestClient<H>,
    payload: PayloadBuilder,
}

impl<H> SettingsGateway<H> {
    /// Creates a gateway over an existing REST client.
    #[must_use]
    pub fn new(rest: RestClient<H>) -> Self {
        Self {
            rest,
            payload: PayloadBuilder::new(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_payload_builder(mut self, payload: PayloadBuilder) -> Self {
        self.payload = payload;
        self
    }
}

impl<H: HttpClient> SettingsGateway<H> {
    /// Reads the full settings document.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any network, status, or decode failure.
    pub async fn fetch_settings(&self) -> Result<SettingsDocument, TransportError> {
        self.rest.get_json(SETTINGS_PATH).await
    }

    /// Reads the current persistent exclusion list.
    ///
    /// An absent key is an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any network, status, or decode failure.
    pub async fn fetch_exclusion_ips(&self) -> Result<ExclusionSet, TransportError> {
        let settings = self.fetch_settings().await?;

        let ips = settings
            .excluded_ips()
            .map_err(|reason| TransportError::Schema {
                url: SETTINGS_PATH.to_string(),
                reason,
            })?;

        Ok(ips.map(ExclusionSet::parse_setting).unwrap_or_default())
    }

    /// Writes `set` as the complete persistent exclusion list.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Validation`] if the payload fails its
    /// self-check (nothing is sent), or [`AllocationError::Transport`] if
    /// the write fails.
    pub async fn persist_exclusion_ips(
        &self,
        set: &ExclusionSet,
    ) -> Result<Acknowledgement, AllocationError> {
        let payload = self.payload.render(set)?;
        tracing::debug!("Settings payload: {}", payload.as_str());

        Ok(self
            .rest
            .put_json(SETTINGS_PATH, payload.into_bytes())
            .await?)
    }

    /// Writes an arbitrary settings document.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any network, status, or decode failure.
    pub async fn put_settings(&self, document: &Value) -> Result<Acknowledgement, TransportError> {
        self.rest
            .put_json(SETTINGS_PATH, document.to_string().into_bytes())
            .await
    }
}
