//! Operator credential check for the admin surface.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use keyhub_core::config::AdminConfig;
use keyhub_core::error::AppError;
use keyhub_core::result::AppResult;

/// Verifies the admin password against the configured Argon2 hash.
///
/// With no hash configured every request is rejected.
#[derive(Debug, Clone)]
pub struct AdminAuthenticator {
    password_hash: Option<String>,
}

impl AdminAuthenticator {
    /// Build from configuration, rejecting a malformed hash up front.
    pub fn new(config: &AdminConfig) -> AppResult<Self> {
        let password_hash = config
            .password_hash
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);

        match &password_hash {
            Some(hash) => {
                PasswordHash::new(hash).map_err(|e| {
                    AppError::configuration(format!("Invalid admin password hash: {e}"))
                })?;
            }
            None => warn!("No admin password hash configured; admin endpoints are disabled"),
        }

        Ok(Self { password_hash })
    }

    /// Check `password`. Fails with `Authentication` on mismatch.
    pub fn verify(&self, password: &str) -> AppResult<()> {
        let Some(hash) = self.password_hash.as_deref() else {
            return Err(AppError::authentication("Admin access is not configured"));
        };

        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => {
                warn!("Admin authentication failed");
                Err(AppError::authentication("Invalid admin password"))
            }
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    Ok(hash.to_string())
}
