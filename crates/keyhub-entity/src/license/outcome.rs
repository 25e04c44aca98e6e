//! Results of license store operations.

use serde::{Deserialize, Serialize};

use super::model::LicenseRecord;

/// Result of an atomic activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// This call performed the `Unactivated -> Activated` transition.
    Transitioned(LicenseRecord),
    /// The record was already activated; it is returned unchanged.
    AlreadyActivated(LicenseRecord),
}

impl ActivationOutcome {
    /// The record as it stands after the attempt.
    pub fn record(&self) -> &LicenseRecord {
        match self {
            Self::Transitioned(record) | Self::AlreadyActivated(record) => record,
        }
    }
}

/// Counts of license records by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseStats {
    /// All issued keys.
    pub total: u64,
    /// Keys bound to a machine.
    pub activated: u64,
    /// Keys still available.
    pub unactivated: u64,
}
