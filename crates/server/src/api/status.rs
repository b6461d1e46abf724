use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use filedock_core::{StatusCheck, StatusCheckCreate};
use tracing::error;

use super::AppState;
use crate::error::ApiError;

/// `POST /api/status` -- record a client check-in.
#[utoipa::path(
    post,
    path = "/api/status",
    tag = "Status",
    summary = "Record a status check",
    description = "Stores a check-in for the named client and returns it with its generated id and timestamp.",
    request_body(content = StatusCheckCreate, description = "Reporting client"),
    responses(
        (status = 200, description = "Check-in recorded", body = StatusCheck),
        (status = 422, description = "Malformed request body", body = super::schemas::ErrorResponse),
        (status = 500, description = "Metadata store failure", body = super::schemas::ErrorResponse)
    )
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    body: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let check = StatusCheck::from(req);

    state.status.insert(&check).await.map_err(|e| {
        error!(error = %e, client_name = %check.client_name, "failed to record status check");
        ApiError::Internal("Error recording status check".into())
    })?;

    Ok(Json(check))
}

/// `GET /api/status` -- list every recorded check-in.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    summary = "List status checks",
    description = "Returns every recorded check-in in insertion order.",
    responses(
        (status = 200, description = "Recorded check-ins", body = Vec<StatusCheck>),
        (status = 500, description = "Metadata store failure", body = super::schemas::ErrorResponse)
    )
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.status.list().await.map_err(|e| {
        error!(error = %e, "failed to list status checks");
        ApiError::Internal("Error listing status checks".into())
    })?;
    Ok(Json(checks))
}
