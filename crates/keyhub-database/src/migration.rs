//! License schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use keyhub_core::error::{AppError, ErrorKind};

/// Embedded migrations for the `licenses` table and the `license_state` type.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the license schema up to date. Already applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying license schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply license schema migrations: {e}"),
            e,
        )
    })?;

    info!("License schema is up to date");
    Ok(())
}
