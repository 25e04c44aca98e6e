//! License activation state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a license key.
///
/// `Activated` is terminal: no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "license_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LicenseState {
    /// Issued, not yet bound to any machine.
    Unactivated,
    /// Bound to exactly one machine.
    Activated,
}

impl LicenseState {
    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unactivated => "unactivated",
            Self::Activated => "activated",
        }
    }
}

impl fmt::Display for LicenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
