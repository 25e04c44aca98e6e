//! License store backend configuration.

use serde::{Deserialize, Serialize};

/// Which license store implementation the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable PostgreSQL table.
    #[default]
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

/// License store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
}
