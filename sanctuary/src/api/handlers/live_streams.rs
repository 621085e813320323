use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::live_stream::{
    CreateLiveStreamRequest, LiveStream, UpdateLiveStreamRequest,
};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/live-streams",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<LiveStream>),
    (status = 429, description = "Too many requests"),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn list_public_live_streams_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<LiveStream>>, AppError> {
    Ok(Json(db::live_streams::list_public(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/live-streams",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<LiveStream>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "live-streams"
)]
#[debug_handler]
pub async fn list_live_streams_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<LiveStream>>, AppError> {
    Ok(Json(db::live_streams::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/live-streams/{id}",
    params(("id" = String, Path, description = "live stream id")),
    responses(
    (status = 200, body = LiveStream),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such live stream"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "live-streams"
)]
#[debug_handler]
pub async fn get_live_stream_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<LiveStream>, AppError> {
    db::live_streams::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/live-streams",
    request_body = CreateLiveStreamRequest,
    responses(
    (status = 201, body = LiveStream),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "live-streams"
)]
#[debug_handler]
pub async fn create_live_stream_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateLiveStreamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::live_streams::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created live stream");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/live-streams/{id}",
    params(("id" = String, Path, description = "live stream id")),
    request_body = UpdateLiveStreamRequest,
    responses(
    (status = 200, body = LiveStream),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such live stream"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "live-streams"
)]
#[debug_handler]
pub async fn update_live_stream_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateLiveStreamRequest>,
) -> Result<Json<LiveStream>, AppError> {
    db::live_streams::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/live-streams/{id}",
    params(("id" = String, Path, description = "live stream id")),
    responses(
    (status = 204, description = "Live stream deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such live stream"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "live-streams"
)]
#[debug_handler]
pub async fn delete_live_stream_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::live_streams::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted live stream");
    Ok(StatusCode::NO_CONTENT)
}
