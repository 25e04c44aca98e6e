//! Operator handlers: issuance, listing, counts.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::{IssueLicensesRequest, ListLicensesQuery};
use crate::dto::response::{ApiResponse, IssuedKeysResponse, LicenseResponse, StatsResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminAccess, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/licenses
pub async fn issue_licenses(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<IssueLicensesRequest>,
) -> ApiResult<Json<ApiResponse<IssuedKeysResponse>>> {
    state.admin_auth.verify(&req.password)?;

    let keys = state
        .issuance_service
        .issue_keys(req.count, req.days, &req.note)
        .await?;

    Ok(Json(ApiResponse::ok(IssuedKeysResponse {
        keys: keys.into_iter().map(String::from).collect(),
    })))
}

/// GET /api/admin/licenses
pub async fn list_licenses(
    State(state): State<AppState>,
    _admin: AdminAccess,
    Query(query): Query<ListLicensesQuery>,
) -> ApiResult<Json<ApiResponse<Vec<LicenseResponse>>>> {
    let records = state.query_service.recent(query.limit).await?;
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(LicenseResponse::from).collect(),
    )))
}

/// GET /api/admin/licenses/stats
pub async fn license_stats(
    State(state): State<AppState>,
    _admin: AdminAccess,
) -> ApiResult<Json<ApiResponse<StatsResponse>>> {
    let stats = state.query_service.stats().await?;
    Ok(Json(ApiResponse::ok(stats.into())))
}
