//! PostgreSQL license store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use keyhub_core::error::{AppError, ErrorKind};
use keyhub_core::result::AppResult;
use keyhub_core::types::{LicenseKey, SortDirection};
use keyhub_entity::license::{ActivationOutcome, LicenseRecord, LicenseStats};

use crate::store::LicenseStore;

/// License store backed by the `licenses` table.
///
/// Activation is a single conditional `UPDATE ... WHERE state =
/// 'unactivated'`: the row lock PostgreSQL takes for the update is the
/// per-key serialization point, so a losing racer re-evaluates the
/// predicate against the winner's committed row and matches nothing.
#[derive(Debug, Clone)]
pub struct PgLicenseStore {
    pool: PgPool,
}

impl PgLicenseStore {
    /// Create a new license store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, key: &LicenseKey) -> AppResult<Option<LicenseRecord>> {
        sqlx::query_as::<_, LicenseRecord>("SELECT * FROM licenses WHERE license_key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find license", e))
    }
}

#[async_trait]
impl LicenseStore for PgLicenseStore {
    async fn create(&self, record: &LicenseRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO licenses (license_key, state, machine_id, created_at, valid_days, activated_at, note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.key)
        .bind(record.state)
        .bind(&record.machine_id)
        .bind(record.created_at)
        .bind(record.valid_days)
        .bind(record.activated_at)
        .bind(&record.note)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(&record.key, e))?;

        debug!(key = %record.key, "License record created");
        Ok(())
    }

    async fn get(&self, key: &LicenseKey) -> AppResult<LicenseRecord> {
        self.find(key)
            .await?
            .ok_or_else(|| AppError::key_not_found("License key does not exist"))
    }

    async fn try_activate(
        &self,
        key: &LicenseKey,
        machine_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ActivationOutcome> {
        let transitioned = sqlx::query_as::<_, LicenseRecord>(
            "UPDATE licenses SET state = 'activated', machine_id = $2, activated_at = $3 \
             WHERE license_key = $1 AND state = 'unactivated' RETURNING *",
        )
        .bind(key)
        .bind(machine_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate license", e))?;

        if let Some(record) = transitioned {
            debug!(key = %key, "License transitioned to activated");
            return Ok(ActivationOutcome::Transitioned(record));
        }

        // Activation is terminal and rows are never deleted, so a key that
        // failed the predicate is either absent or already activated.
        match self.find(key).await? {
            Some(record) if record.is_activated() => Ok(ActivationOutcome::AlreadyActivated(record)),
            Some(_) => Err(AppError::internal(
                "License neither transitioned nor activated",
            )),
            None => Err(AppError::key_not_found("License key does not exist")),
        }
    }

    async fn list(&self, limit: u32, direction: SortDirection) -> AppResult<Vec<LicenseRecord>> {
        let sql = format!(
            "SELECT * FROM licenses ORDER BY created_at {dir}, license_key {dir} LIMIT $1",
            dir = direction.as_sql()
        );

        sqlx::query_as::<_, LicenseRecord>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list licenses", e))
    }

    async fn stats(&self) -> AppResult<LicenseStats> {
        let (total, activated): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE state = 'activated') FROM licenses",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count licenses", e))?;

        let total = total as u64;
        let activated = activated as u64;
        Ok(LicenseStats {
            total,
            activated,
            unactivated: total - activated,
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// Translate a unique violation on insert into `DuplicateKey`.
fn map_insert_error(key: &LicenseKey, err: sqlx::Error) -> AppError {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if duplicate {
        AppError::with_source(
            ErrorKind::DuplicateKey,
            format!("License key '{key}' already exists"),
            err,
        )
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to create license", err)
    }
}
