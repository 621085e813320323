use axum::{debug_handler, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
    (status = 200, body = HealthStatus),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
