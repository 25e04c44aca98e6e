//! Operator credential configuration.

use serde::{Deserialize, Serialize};

/// Admin surface configuration.
///
/// The credential is stored as an Argon2 PHC string; generate one with
/// `keyhub-cli hash-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Argon2 hash of the admin password. Admin endpoints reject every
    /// request while this is unset.
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Default number of records shown in the recent-licenses view.
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password_hash: None,
            list_limit: default_list_limit(),
        }
    }
}

fn default_list_limit() -> u32 {
    20
}
