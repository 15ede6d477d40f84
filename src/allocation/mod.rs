//! Node allocation exclusion management.
//!
//! `nodes exclude` and `nodes include` edit the cluster setting
//! `cluster.routing.allocation.exclude._ip` with a read-modify-write:
//!
//! 1. validate the delta (nothing is sent if any entry is bad)
//! 2. fetch the current list ([`SettingsGateway::fetch_exclusion_ips`])
//! 3. compute the new list ([`exclude`] / [`include`])
//! 4. write the complete new list back ([`SettingsGateway::persist_exclusion_ips`])
//!
//! The fetch and the write are not atomic. A settings write by anyone else
//! between steps 2 and 4 is lost.

mod editor;
mod error;
mod gateway;
mod payload;

#[cfg(test)]
mod payload_tests;

pub use editor::{Delta, ExclusionSet, dedup, exclude, include, unmatched};
pub use error::{AllocationError, InvalidIpError, ValidationError};
pub use gateway::{Acknowledgement, SETTINGS_PATH, SettingsDocument, SettingsGateway};
pub use payload::{
    EXCLUDE_IP_KEY, PayloadBuilder, REBALANCE_ENABLE_ALL, REBALANCE_ENABLE_KEY, SettingsPayload,
};

use std::fmt;

use crate::transport::HttpClient;

/// Which way a delta is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Add the delta to the exclusion list
    Exclude,
    /// Remove the delta from the exclusion list
    Include,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => write!(f, "exclude"),
            Self::Include => write!(f, "include"),
        }
    }
}

impl Operation {
    /// Computes the new exclusion list.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpError`] if any delta entry is not an IP literal.
    pub fn apply(self, delta: &Delta, current: &ExclusionSet) -> Result<ExclusionSet, InvalidIpError> {
        match self {
            Self::Exclude => exclude(delta, current),
            Self::Include => include(delta, current),
        }
    }
}

/// Result of a completed exclude/include run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The list read from the cluster
    pub previous: ExclusionSet,
    /// The list written back
    pub updated: ExclusionSet,
    /// The server's answer to the write
    pub acknowledgement: Acknowledgement,
}

/// Runs one exclude/include: validate, fetch, compute, persist.
///
/// Issues at most one read and one write, in that order.
///
/// # Errors
///
/// - [`AllocationError::InvalidIp`] before any request is made
/// - [`AllocationError::Transport`] if the read or the write fails
/// - [`AllocationError::Validation`] if the payload fails its self-check
///   (the write is not attempted)
pub async fn run<H: HttpClient>(
    gateway: &SettingsGateway<H>,
    operation: Operation,
    delta: &Delta,
) -> Result<Outcome, AllocationError> {
    delta.validate()?;

    let previous = gateway.fetch_exclusion_ips().await?;
    tracing::debug!("Current exclusion list: [{}]", previous.to_setting());

    if operation == Operation::Include {
        let ignored = unmatched(delta, &previous);
        if !ignored.is_empty() {
            tracing::debug!("Not in exclusion list, ignored: {}", ignored.join(","));
        }
    }

    let updated = operation.apply(delta, &previous)?;
    tracing::info!(
        "{operation}: writing exclusion list [{}] ({} -> {} entries)",
        updated.to_setting(),
        previous.len(),
        updated.len()
    );

    let acknowledgement = gateway.persist_exclusion_ips(&updated).await?;
    if !acknowledgement.acknowledged {
        tracing::warn!("Settings update was not acknowledged by the cluster");
    }

    Ok(Outcome {
        previous,
        updated,
        acknowledgement,
    })
}
