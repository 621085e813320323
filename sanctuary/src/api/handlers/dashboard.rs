use axum::{debug_handler, extract::State, Json};
use sanctuary_core::models::dashboard::DashboardStats;

use crate::api::error::AppError;
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard/stats",
    responses(
    (status = 200, body = DashboardStats),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "dashboard"
)]
#[debug_handler]
pub async fn dashboard_stats_handler(
    State(state): State<SharedAppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(db::dashboard::stats(state.db.pool()).await?))
}
