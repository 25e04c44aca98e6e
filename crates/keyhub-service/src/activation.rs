//! License activation: binds a key to the first machine that presents it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use keyhub_core::error::AppError;
use keyhub_core::result::AppResult;
use keyhub_core::types::LicenseKey;
use keyhub_database::store::LicenseStore;
use keyhub_entity::license::{ActivationOutcome, LicenseRecord, ValidDays};

/// Successful activation.
///
/// A fresh activation and a repeat activation from the bound machine have
/// the same shape; `first_activation` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationResult {
    /// Validity window, passed through uninterpreted.
    pub valid_days: ValidDays,
    /// Whether this request performed the binding.
    pub first_activation: bool,
    /// When the key was bound.
    pub activated_at: DateTime<Utc>,
}

impl ActivationResult {
    fn from_record(record: &LicenseRecord, first_activation: bool) -> AppResult<Self> {
        let activated_at = record
            .activated_at
            .ok_or_else(|| AppError::internal("Activated license has no activation time"))?;

        Ok(Self {
            valid_days: record.valid_days,
            first_activation,
            activated_at,
        })
    }
}

/// The activation state machine.
///
/// `Unactivated -> Activated` happens at most once per key, inside the
/// store's atomic `try_activate`. Expiry is not evaluated here: a key
/// whose validity window has elapsed still re-activates on its machine.
#[derive(Debug, Clone)]
pub struct ActivationService {
    store: Arc<dyn LicenseStore>,
}

impl ActivationService {
    /// Creates a new activation service.
    pub fn new(store: Arc<dyn LicenseStore>) -> Self {
        Self { store }
    }

    /// Activate `key` for `machine_id`.
    ///
    /// Fails with `KeyNotFound` for an unknown key and `MachineMismatch`
    /// when the key is bound to a different machine. Both are final.
    pub async fn activate(&self, key: &str, machine_id: &str) -> AppResult<ActivationResult> {
        let key = LicenseKey::new(key)?;
        if machine_id.trim().is_empty() {
            return Err(AppError::validation("Machine identifier must not be empty"));
        }

        let outcome = self.store.try_activate(&key, machine_id, Utc::now()).await?;

        match outcome {
            ActivationOutcome::Transitioned(record) => {
                info!(key = %key, machine_id, valid_days = %record.valid_days, "License activated");
                ActivationResult::from_record(&record, true)
            }
            ActivationOutcome::AlreadyActivated(record) if record.is_bound_to(machine_id) => {
                debug!(key = %key, machine_id, "License re-activated on its bound machine");
                ActivationResult::from_record(&record, false)
            }
            ActivationOutcome::AlreadyActivated(_) => {
                warn!(key = %key, machine_id, "Activation rejected: key bound to another machine");
                Err(AppError::machine_mismatch(
                    "License key is already activated on another machine",
                ))
            }
        }
    }
}
