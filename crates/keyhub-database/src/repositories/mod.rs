//! PostgreSQL repository implementations.

pub mod license;

pub use license::PgLicenseStore;
