//! License record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use keyhub_core::types::LicenseKey;

use super::state::LicenseState;
use super::validity::ValidDays;

/// One issued license key and its activation binding.
///
/// `machine_id` and `activated_at` are set together with
/// `state = Activated` and are `None` while the key is unactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LicenseRecord {
    /// The license key (primary key).
    #[sqlx(rename = "license_key")]
    pub key: LicenseKey,
    /// Activation state.
    pub state: LicenseState,
    /// Machine the key is bound to.
    pub machine_id: Option<String>,
    /// When the key was issued.
    pub created_at: DateTime<Utc>,
    /// Validity window counted from activation.
    pub valid_days: ValidDays,
    /// When the key was bound.
    pub activated_at: Option<DateTime<Utc>>,
    /// Operator annotation.
    pub note: String,
}

impl LicenseRecord {
    /// Build a freshly issued, unactivated record.
    pub fn issue(new: NewLicense, created_at: DateTime<Utc>) -> Self {
        Self {
            key: new.key,
            state: LicenseState::Unactivated,
            machine_id: None,
            created_at,
            valid_days: new.valid_days,
            activated_at: None,
            note: new.note,
        }
    }

    /// Check if the key has been bound to a machine.
    pub fn is_activated(&self) -> bool {
        self.state == LicenseState::Activated
    }

    /// Check if the key is bound to the given machine.
    pub fn is_bound_to(&self, machine_id: &str) -> bool {
        self.is_activated() && self.machine_id.as_deref() == Some(machine_id)
    }

    /// Apply the one-way `Unactivated -> Activated` transition.
    ///
    /// Returns `false` and leaves the record untouched if it is already
    /// activated. Callers are responsible for holding whatever lock makes
    /// the check and the write indivisible.
    pub fn bind(&mut self, machine_id: &str, now: DateTime<Utc>) -> bool {
        if self.is_activated() {
            return false;
        }
        self.state = LicenseState::Activated;
        self.machine_id = Some(machine_id.to_string());
        self.activated_at = Some(now);
        true
    }

    /// Expiry derived from the activation time, if bounded.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
            .and_then(|activated| self.valid_days.expires_at(activated))
    }
}

/// Data for issuing a new license record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLicense {
    /// Freshly generated key.
    pub key: LicenseKey,
    /// Validity window.
    pub valid_days: ValidDays,
    /// Operator annotation shared by the batch.
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> LicenseRecord {
        LicenseRecord::issue(
            NewLicense {
                key: LicenseKey::new("K-1").expect("key"),
                valid_days: ValidDays::UNLIMITED,
                note: "test".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_issued_record_is_unbound() {
        let record = fresh();
        assert_eq!(record.state, LicenseState::Unactivated);
        assert!(record.machine_id.is_none());
        assert!(record.activated_at.is_none());
    }

    #[test]
    fn test_bind_sets_all_fields_once() {
        let mut record = fresh();
        let first = Utc::now();
        assert!(record.bind("m1", first));
        assert!(record.is_bound_to("m1"));
        assert_eq!(record.activated_at, Some(first));

        assert!(!record.bind("m2", Utc::now()));
        assert!(record.is_bound_to("m1"));
        assert_eq!(record.activated_at, Some(first));
    }

    #[test]
    fn test_unlimited_record_never_expires() {
        let mut record = fresh();
        record.bind("m1", Utc::now());
        assert!(record.expires_at().is_none());
    }
}
