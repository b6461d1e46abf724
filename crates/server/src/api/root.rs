use axum::Json;
use axum::response::IntoResponse;

use super::schemas::MessageResponse;

/// Greeting returned by the API root.
pub const ROOT_MESSAGE: &str = "File Manager API";

/// `GET /api/` -- service greeting.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Root",
    summary = "API root",
    description = "Returns a fixed greeting identifying the service.",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse)
    )
)]
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse::new(ROOT_MESSAGE))
}
