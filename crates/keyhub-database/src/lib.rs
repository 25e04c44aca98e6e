//! # keyhub-database
//!
//! PostgreSQL connection management and the license store: the trait the
//! service layer programs against, a PostgreSQL implementation, and an
//! in-memory implementation for tests and ephemeral deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryLicenseStore;
pub use repositories::PgLicenseStore;
pub use store::{LicenseStore, open_store};
