//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keyhub_entity::license::{LicenseRecord, LicenseState, LicenseStats};
use keyhub_service::ActivationResult;

/// Standard success wrapper for admin responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Activation response, in the shape deployed clients parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateResponse {
    /// Always `"success"`.
    pub status: String,
    /// `"activated"` on first binding, `"welcome back"` on a repeat.
    pub msg: String,
    /// Validity in days, `-1` for unlimited.
    pub days: i32,
}

impl From<ActivationResult> for ActivateResponse {
    fn from(result: ActivationResult) -> Self {
        let msg = if result.first_activation {
            "activated"
        } else {
            "welcome back"
        };
        Self {
            status: "success".to_string(),
            msg: msg.to_string(),
            days: result.valid_days.days(),
        }
    }
}

/// Keys produced by one issuance call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedKeysResponse {
    /// Newly created keys, in creation order.
    pub keys: Vec<String>,
}

/// One row of the recent-licenses listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseResponse {
    pub key: String,
    pub state: LicenseState,
    pub machine_id: Option<String>,
    pub valid_days: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    /// Informational only; activation does not enforce it.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<LicenseRecord> for LicenseResponse {
    fn from(record: LicenseRecord) -> Self {
        let expires_at = record.expires_at();
        Self {
            key: record.key.into_inner(),
            state: record.state,
            machine_id: record.machine_id,
            valid_days: record.valid_days.days(),
            note: record.note,
            created_at: record.created_at,
            activated_at: record.activated_at,
            expires_at,
        }
    }
}

/// Counts by state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: u64,
    pub activated: u64,
    pub unactivated: u64,
}

impl From<LicenseStats> for StatsResponse {
    fn from(stats: LicenseStats) -> Self {
        Self {
            total: stats.total,
            activated: stats.activated,
            unactivated: stats.unactivated,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answers, `"degraded"` otherwise.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Store reachability.
    pub store: String,
}
