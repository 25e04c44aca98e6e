//! In-memory license store using a sharded concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use keyhub_core::error::AppError;
use keyhub_core::result::AppResult;
use keyhub_core::types::{LicenseKey, SortDirection};
use keyhub_entity::license::{ActivationOutcome, LicenseRecord, LicenseStats};

use crate::store::LicenseStore;

/// License store held in process memory.
///
/// Each key's read-modify-write runs under the write lock of the shard
/// that owns it, so racing activations on one key serialize while keys
/// in other shards proceed in parallel. Contents do not survive a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryLicenseStore {
    records: Arc<DashMap<LicenseKey, LicenseRecord>>,
}

impl MemoryLicenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl LicenseStore for MemoryLicenseStore {
    async fn create(&self, record: &LicenseRecord) -> AppResult<()> {
        match self.records.entry(record.key.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_key(format!(
                "License key '{}' already exists",
                record.key
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                debug!(key = %record.key, "License record created");
                Ok(())
            }
        }
    }

    async fn get(&self, key: &LicenseKey) -> AppResult<LicenseRecord> {
        self.records
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::key_not_found("License key does not exist"))
    }

    async fn try_activate(
        &self,
        key: &LicenseKey,
        machine_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ActivationOutcome> {
        // The guard holds the shard lock until the end of this block.
        let mut entry = self
            .records
            .get_mut(key)
            .ok_or_else(|| AppError::key_not_found("License key does not exist"))?;

        if entry.bind(machine_id, now) {
            debug!(key = %key, "License transitioned to activated");
            Ok(ActivationOutcome::Transitioned(entry.value().clone()))
        } else {
            Ok(ActivationOutcome::AlreadyActivated(entry.value().clone()))
        }
    }

    async fn list(&self, limit: u32, direction: SortDirection) -> AppResult<Vec<LicenseRecord>> {
        let mut records: Vec<LicenseRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();

        records.sort_by(|a, b| {
            let order = a
                .created_at
                .cmp(&b.created_at)
                .then_with(|| a.key.cmp(&b.key));
            match direction {
                SortDirection::Asc => order,
                SortDirection::Desc => order.reverse(),
            }
        });
        records.truncate(limit as usize);
        Ok(records)
    }

    async fn stats(&self) -> AppResult<LicenseStats> {
        let mut stats = LicenseStats::default();
        for entry in self.records.iter() {
            stats.total += 1;
            if entry.is_activated() {
                stats.activated += 1;
            } else {
                stats.unactivated += 1;
            }
        }
        Ok(stats)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
