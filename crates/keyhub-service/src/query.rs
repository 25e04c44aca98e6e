//! Read-only views over the license table.

use std::sync::Arc;

use keyhub_core::result::AppResult;
use keyhub_core::types::{LicenseKey, SortDirection};
use keyhub_database::store::LicenseStore;
use keyhub_entity::license::{LicenseRecord, LicenseStats};

/// Upper bound on a single listing.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Recent-licenses listing, single lookup, and counts.
#[derive(Debug, Clone)]
pub struct LicenseQueryService {
    store: Arc<dyn LicenseStore>,
    default_limit: u32,
}

impl LicenseQueryService {
    /// Creates a new query service with the listing default.
    pub fn new(store: Arc<dyn LicenseStore>, default_limit: u32) -> Self {
        Self {
            store,
            default_limit: default_limit.clamp(1, MAX_LIST_LIMIT),
        }
    }

    /// Most recently created licenses, newest first.
    pub async fn recent(&self, limit: Option<u32>) -> AppResult<Vec<LicenseRecord>> {
        let limit = limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_LIST_LIMIT);
        self.store.list(limit, SortDirection::Desc).await
    }

    /// Look up one license by key.
    pub async fn get(&self, key: &str) -> AppResult<LicenseRecord> {
        let key = LicenseKey::new(key)?;
        self.store.get(&key).await
    }

    /// Counts by state.
    pub async fn stats(&self) -> AppResult<LicenseStats> {
        self.store.stats().await
    }
}
