//! Client activation handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::ActivateRequest;
use crate::dto::response::ActivateResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/activate
pub async fn activate(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ActivateRequest>,
) -> ApiResult<Json<ActivateResponse>> {
    let result = state
        .activation_service
        .activate(&req.key, &req.hwid)
        .await?;

    Ok(Json(result.into()))
}
