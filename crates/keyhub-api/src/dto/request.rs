//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client activation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivateRequest {
    /// License key.
    #[validate(length(min = 1, message = "License key is required"))]
    pub key: String,
    /// Hardware fingerprint of the requesting machine.
    #[validate(length(min = 1, message = "Machine identifier is required"))]
    pub hwid: String,
}

/// Batch issuance request body.
///
/// Range checks on `count` and `days` are left to the issuance service so
/// the CLI and HTTP paths reject the same inputs with the same errors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueLicensesRequest {
    /// Admin password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Number of keys to generate.
    pub count: i64,
    /// Validity in days, `-1` for unlimited.
    pub days: i32,
    /// Free-text note (customer, channel).
    #[serde(default)]
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: String,
}

/// Query parameters for the recent-licenses listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLicensesQuery {
    /// Maximum number of records (clamped to 1..=100).
    pub limit: Option<u32>,
}
