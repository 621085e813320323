use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::ministry::{CreateMinistryRequest, Ministry, UpdateMinistryRequest};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/ministries",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Ministry>),
    (status = 429, description = "Too many requests"),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn list_active_ministries_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Ministry>>, AppError> {
    Ok(Json(db::ministries::list_active(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/ministries",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Ministry>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "ministries"
)]
#[debug_handler]
pub async fn list_ministries_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Ministry>>, AppError> {
    Ok(Json(db::ministries::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/ministries/{id}",
    params(("id" = String, Path, description = "ministry id")),
    responses(
    (status = 200, body = Ministry),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such ministry"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "ministries"
)]
#[debug_handler]
pub async fn get_ministry_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Ministry>, AppError> {
    db::ministries::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/ministries",
    request_body = CreateMinistryRequest,
    responses(
    (status = 201, body = Ministry),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "ministries"
)]
#[debug_handler]
pub async fn create_ministry_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateMinistryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::ministries::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created ministry");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/ministries/{id}",
    params(("id" = String, Path, description = "ministry id")),
    request_body = UpdateMinistryRequest,
    responses(
    (status = 200, body = Ministry),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such ministry"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "ministries"
)]
#[debug_handler]
pub async fn update_ministry_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateMinistryRequest>,
) -> Result<Json<Ministry>, AppError> {
    db::ministries::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/ministries/{id}",
    params(("id" = String, Path, description = "ministry id")),
    responses(
    (status = 204, description = "Ministry deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such ministry"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "ministries"
)]
#[debug_handler]
pub async fn delete_ministry_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::ministries::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted ministry");
    Ok(StatusCode::NO_CONTENT)
}
