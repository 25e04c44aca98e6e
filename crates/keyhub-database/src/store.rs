//! License store trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use keyhub_core::config::{DatabaseConfig, StorageBackend};
use keyhub_core::result::AppResult;
use keyhub_core::types::{LicenseKey, SortDirection};
use keyhub_entity::license::{ActivationOutcome, LicenseRecord, LicenseStats};

use crate::connection::DatabasePool;
use crate::memory::MemoryLicenseStore;
use crate::repositories::PgLicenseStore;

/// Durable table of license records, keyed by license key.
///
/// The store is the sole owner of activation state. Implementations must
/// make [`LicenseStore::try_activate`] linearizable per key: when callers
/// race on the same unactivated key exactly one of them observes
/// [`ActivationOutcome::Transitioned`], every other caller observes
/// [`ActivationOutcome::AlreadyActivated`] with the winner's binding.
/// Operations on different keys must not serialize behind one another.
#[async_trait]
pub trait LicenseStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record.
    ///
    /// Fails with `DuplicateKey` if the key already exists; an existing
    /// record is never overwritten.
    async fn create(&self, record: &LicenseRecord) -> AppResult<()>;

    /// Fetch a record. Fails with `KeyNotFound` if absent.
    async fn get(&self, key: &LicenseKey) -> AppResult<LicenseRecord>;

    /// Atomically bind an unactivated key to `machine_id`.
    ///
    /// Fails with `KeyNotFound` if absent. An already-activated record is
    /// returned untouched regardless of which machine it is bound to.
    async fn try_activate(
        &self,
        key: &LicenseKey,
        machine_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ActivationOutcome>;

    /// List up to `limit` records ordered by creation time.
    async fn list(&self, limit: u32, direction: SortDirection) -> AppResult<Vec<LicenseRecord>>;

    /// Count records by state.
    async fn stats(&self) -> AppResult<LicenseStats>;

    /// Check that the backing storage is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Open the configured store backend.
///
/// For PostgreSQL, pending migrations are applied when `migrate` is set.
pub async fn open_store(
    backend: StorageBackend,
    database: &DatabaseConfig,
    migrate: bool,
) -> AppResult<Arc<dyn LicenseStore>> {
    match backend {
        StorageBackend::Postgres => {
            let pool = if migrate {
                DatabasePool::connect_and_migrate(database).await?
            } else {
                DatabasePool::connect(database).await?
            };
            info!("Using PostgreSQL license store");
            Ok(Arc::new(PgLicenseStore::new(pool.into_pool())))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory license store; records are lost on exit");
            Ok(Arc::new(MemoryLicenseStore::new()))
        }
    }
}
