//! Rendering of the replacement settings document.

use handlebars::Handlebars;
use serde::Serialize;

use super::{ExclusionSet, ValidationError};

/// Settings key holding the comma-separated exclusion list.
pub const EXCLUDE_IP_KEY: &str = "cluster.routing.allocation.exclude._ip";

/// Settings key re-asserted on every write.
pub const REBALANCE_ENABLE_KEY: &str = "cluster.routing.rebalance.enable";

/// Value written to [`REBALANCE_ENABLE_KEY`].
pub const REBALANCE_ENABLE_ALL: &str = "all";

const SETTINGS_TEMPLATE: &str = r#"{
  "persistent": {
    "cluster.routing.rebalance.enable": "all",
    "cluster.routing.allocation.exclude._ip": "{{ips}}"
  }
}"#;

#[derive(Serialize)]
struct TemplateData<'a> {
    ips: &'a str,
}

/// A rendered settings document that passed the self-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPayload {
    body: String,
}

impl SettingsPayload {
    /// The document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// The document as a request body.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_bytes()
    }
}

/// Renders an [`ExclusionSet`] into the persistent settings document.
///
/// The document always carries the whole set, never a delta. Rendered text
/// is parsed back before it is handed out; a document that does not parse,
/// or does not carry the expected values, is a [`ValidationError`].
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    template: String,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadBuilder {
    /// Creates a builder using the standard settings template.
    #[must_use]
    pub fn new() -> Self {
        Self {
            template: SETTINGS_TEMPLATE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renders and verifies the settings document for `set`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if rendering fails or the result does not
    /// parse back to the expected document.
    pub fn render(&self, set: &ExclusionSet) -> Result<SettingsPayload, ValidationError> {
        let ips = set.to_setting();

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(escape_json_string);
        let body = handlebars
            .render_template(&self.template, &TemplateData { ips: &ips })
            .map_err(|e| ValidationError::Render(e.to_string()))?;

        verify(&body, &ips)?;

        Ok(SettingsPayload { body })
    }
}

/// Escapes a value for use inside a JSON string literal.
fn escape_json_string(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_string()
}

fn verify(body: &str, expected_ips: &str) -> Result<(), ValidationError> {
    let document: serde_json::Value =
        serde_json::from_str(body).map_err(ValidationError::Malformed)?;

    let persistent = document
        .get("persistent")
        .and_then(serde_json::Value::as_object)
        .ok_or(ValidationError::Mismatch { key: "persistent" })?;

    if persistent.get(EXCLUDE_IP_KEY).and_then(serde_json::Value::as_str) != Some(expected_ips) {
        return Err(ValidationError::Mismatch {
            key: EXCLUDE_IP_KEY,
        });
    }

    if persistent
        .get(REBALANCE_ENABLE_KEY)
        .and_then(serde_json::Value::as_str)
        != Some(REBALANCE_ENABLE_ALL)
    {
        return Err(ValidationError::Mismatch {
            key: REBALANCE_ENABLE_KEY,
        });
    }

    Ok(())
}
