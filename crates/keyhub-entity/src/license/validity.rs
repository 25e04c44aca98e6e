//! Validity window value type.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use keyhub_core::AppError;

/// Permitted usage duration of a license, counted from activation.
///
/// Either [`ValidDays::UNLIMITED`] (`-1`) or a positive number of days.
/// Zero and other negative values cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[sqlx(transparent)]
pub struct ValidDays(i32);

impl ValidDays {
    /// Unlimited validity.
    pub const UNLIMITED: Self = Self(-1);

    /// Validate a raw day count.
    pub fn new(days: i32) -> Result<Self, AppError> {
        if days == -1 || days > 0 {
            Ok(Self(days))
        } else {
            Err(AppError::invalid_validity(format!(
                "Validity must be -1 (unlimited) or a positive number of days, got {days}"
            )))
        }
    }

    /// Whether the license never expires.
    pub fn is_unlimited(&self) -> bool {
        self.0 == -1
    }

    /// Raw day count as stored (`-1` for unlimited).
    pub fn days(&self) -> i32 {
        self.0
    }

    /// Expiry instant for a license activated at `activated_at`.
    ///
    /// Informational only: activation never consults it. `None` for
    /// unlimited licenses and for windows past the representable range.
    pub fn expires_at(&self, activated_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.is_unlimited() {
            return None;
        }
        activated_at.checked_add_signed(Duration::days(i64::from(self.0)))
    }
}

impl TryFrom<i32> for ValidDays {
    type Error = AppError;

    fn try_from(days: i32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<ValidDays> for i32 {
    fn from(days: ValidDays) -> i32 {
        days.0
    }
}

impl fmt::Display for ValidDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "unlimited")
        } else {
            write!(f, "{} days", self.0)
        }
    }
}
