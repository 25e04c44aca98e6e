//! `AdminAccess` extractor for read-only admin routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use keyhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin password on `GET` admin routes.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Proof that the request carried the admin password.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let password = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing admin password header"))?;

        state.admin_auth.verify(password)?;
        Ok(Self)
    }
}
