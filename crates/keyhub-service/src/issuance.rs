//! Batch license issuance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use keyhub_core::error::{AppError, ErrorKind};
use keyhub_core::result::AppResult;
use keyhub_core::traits::KeyGenerator;
use keyhub_core::types::LicenseKey;
use keyhub_database::store::LicenseStore;
use keyhub_entity::license::{LicenseRecord, NewLicense, ValidDays};

/// Smallest accepted batch.
pub const MIN_BATCH_SIZE: i64 = 1;
/// Largest accepted batch.
pub const MAX_BATCH_SIZE: i64 = 100;
/// Generator draws per slot before a collision is treated as a fault.
pub const MAX_GENERATION_ATTEMPTS: u32 = 8;

/// Creates batches of fresh, unactivated licenses.
#[derive(Debug, Clone)]
pub struct IssuanceService {
    store: Arc<dyn LicenseStore>,
    generator: Arc<dyn KeyGenerator>,
}

impl IssuanceService {
    /// Creates a new issuance service.
    pub fn new(store: Arc<dyn LicenseStore>, generator: Arc<dyn KeyGenerator>) -> Self {
        Self { store, generator }
    }

    /// Issue `count` licenses valid for `valid_days` (`-1` for unlimited).
    ///
    /// Arguments are validated before anything is written. Records are
    /// created one at a time; if a later write fails, the earlier ones stay.
    pub async fn issue_keys(
        &self,
        count: i64,
        valid_days: i32,
        note: &str,
    ) -> AppResult<Vec<LicenseKey>> {
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
            return Err(AppError::invalid_count(format!(
                "Count must be between {MIN_BATCH_SIZE} and {MAX_BATCH_SIZE}, got {count}"
            )));
        }
        let valid_days = ValidDays::new(valid_days)?;

        let mut keys = Vec::with_capacity(count as usize);
        for _ in 0..count {
            keys.push(self.issue_one(valid_days, note).await?);
        }

        info!(count, valid_days = %valid_days, "Issued license batch");
        Ok(keys)
    }

    async fn issue_one(&self, valid_days: ValidDays, note: &str) -> AppResult<LicenseKey> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let key = LicenseKey::new(self.generator.generate())?;
            let record = LicenseRecord::issue(
                NewLicense {
                    key: key.clone(),
                    valid_days,
                    note: note.to_string(),
                },
                Utc::now(),
            );

            match self.store.create(&record).await {
                Ok(()) => return Ok(key),
                Err(e) if e.is(ErrorKind::DuplicateKey) => {
                    warn!(key = %key, attempt, "Generated key collided with an existing license");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(format!(
            "Key generator produced {MAX_GENERATION_ATTEMPTS} colliding keys in a row"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use keyhub_core::types::SortDirection;
    use keyhub_database::MemoryLicenseStore;
    use keyhub_entity::license::LicenseState;

    use crate::keygen::UuidKeyGenerator;

    /// Yields a fixed sequence of keys, repeating the last one forever.
    #[derive(Debug)]
    struct ScriptedGenerator {
        keys: Mutex<Vec<&'static str>>,
    }

    impl ScriptedGenerator {
        fn new(mut keys: Vec<&'static str>) -> Self {
            keys.reverse();
            Self {
                keys: Mutex::new(keys),
            }
        }
    }

    impl KeyGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            let mut keys = self.keys.lock().unwrap();
            if keys.len() > 1 {
                keys.pop().unwrap().to_string()
            } else {
                keys[0].to_string()
            }
        }
    }

    fn service(store: &MemoryLicenseStore) -> IssuanceService {
        IssuanceService::new(Arc::new(store.clone()), Arc::new(UuidKeyGenerator::new()))
    }

    #[tokio::test]
    async fn test_issue_creates_unactivated_records() {
        let store = MemoryLicenseStore::new();
        let keys = service(&store).issue_keys(3, 30, "batch").await.unwrap();
        assert_eq!(keys.len(), 3);

        for key in &keys {
            let record = store.get(key).await.unwrap();
            assert_eq!(record.state, LicenseState::Unactivated);
            assert_eq!(record.valid_days.days(), 30);
            assert_eq!(record.note, "batch");
            assert!(record.machine_id.is_none());
            assert!(record.activated_at.is_none());
        }
    }

    #[tokio::test]
    async fn test_count_out_of_range_writes_nothing() {
        let store = MemoryLicenseStore::new();
        let svc = service(&store);

        for count in [0, -1, 101] {
            let err = svc.issue_keys(count, 30, "").await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidCount, "count {count}");
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_validity_writes_nothing() {
        let store = MemoryLicenseStore::new();
        let svc = service(&store);

        for days in [0, -2, -30] {
            let err = svc.issue_keys(5, days, "").await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidValidity, "days {days}");
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_batch_bounds_and_unlimited_validity() {
        let store = MemoryLicenseStore::new();
        let svc = service(&store);

        let one = svc.issue_keys(1, -1, "").await.unwrap();
        assert!(store.get(&one[0]).await.unwrap().valid_days.is_unlimited());

        let hundred = svc.issue_keys(100, 365, "").await.unwrap();
        assert_eq!(hundred.len(), 100);
        assert_eq!(store.len(), 101);
    }

    #[tokio::test]
    async fn test_keys_are_distinct_across_batches() {
        let store = MemoryLicenseStore::new();
        let svc = service(&store);

        let mut seen = HashSet::new();
        for _ in 0..5 {
            for key in svc.issue_keys(20, 7, "").await.unwrap() {
                assert!(seen.insert(key));
            }
        }
        let listed = store.list(1000, SortDirection::Desc).await.unwrap();
        assert_eq!(listed.len(), 100);
    }

    #[tokio::test]
    async fn test_issued_batch_activates_on_distinct_machines() {
        let store = MemoryLicenseStore::new();
        let keys = service(&store).issue_keys(5, -1, "bulk").await.unwrap();
        let activation = crate::ActivationService::new(Arc::new(store.clone()));

        for (i, key) in keys.iter().enumerate() {
            let result = activation
                .activate(key.as_str(), &format!("machine-{i}"))
                .await
                .unwrap();
            assert!(result.first_activation);
            assert!(result.valid_days.is_unlimited());
        }
        assert_eq!(store.stats().await.unwrap().activated, 5);
    }

    #[tokio::test]
    async fn test_collision_is_retried_without_overwrite() {
        let store = MemoryLicenseStore::new();
        let existing = LicenseRecord::issue(
            NewLicense {
                key: LicenseKey::new("TAKEN").unwrap(),
                valid_days: ValidDays::UNLIMITED,
                note: "original".into(),
            },
            Utc::now(),
        );
        store.create(&existing).await.unwrap();

        let svc = IssuanceService::new(
            Arc::new(store.clone()),
            Arc::new(ScriptedGenerator::new(vec!["TAKEN", "FRESH"])),
        );
        let keys = svc.issue_keys(1, 10, "new").await.unwrap();
        assert_eq!(keys[0].as_str(), "FRESH");

        let untouched = store.get(&LicenseKey::new("TAKEN").unwrap()).await.unwrap();
        assert_eq!(untouched, existing);
    }

    #[tokio::test]
    async fn test_persistent_collision_is_internal_error() {
        let store = MemoryLicenseStore::new();
        let svc = IssuanceService::new(
            Arc::new(store.clone()),
            Arc::new(ScriptedGenerator::new(vec!["SAME"])),
        );

        let err = svc.issue_keys(2, 10, "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(store.len(), 1);
    }
}
