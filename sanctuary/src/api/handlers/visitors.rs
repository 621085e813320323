use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::visitor::{CreateVisitorRequest, UpdateVisitorRequest, Visitor};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

/// Visitor card submitted from the public site.
#[utoipa::path(
    post,
    path = "/api/v1/visitors",
    request_body = CreateVisitorRequest,
    responses(
    (status = 201, body = Visitor),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 429, description = "Too many requests"),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn submit_visitor_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateVisitorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::visitors::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Visitor card received");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/visitors",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Visitor>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "visitors"
)]
#[debug_handler]
pub async fn list_visitors_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Visitor>>, AppError> {
    Ok(Json(db::visitors::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/visitors/{id}",
    params(("id" = String, Path, description = "visitor id")),
    responses(
    (status = 200, body = Visitor),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such visitor"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "visitors"
)]
#[debug_handler]
pub async fn get_visitor_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Visitor>, AppError> {
    db::visitors::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/visitors",
    request_body = CreateVisitorRequest,
    responses(
    (status = 201, body = Visitor),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "visitors"
)]
#[debug_handler]
pub async fn create_visitor_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateVisitorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::visitors::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created visitor");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/visitors/{id}",
    params(("id" = String, Path, description = "visitor id")),
    request_body = UpdateVisitorRequest,
    responses(
    (status = 200, body = Visitor),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such visitor"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "visitors"
)]
#[debug_handler]
pub async fn update_visitor_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateVisitorRequest>,
) -> Result<Json<Visitor>, AppError> {
    db::visitors::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/visitors/{id}",
    params(("id" = String, Path, description = "visitor id")),
    responses(
    (status = 204, description = "Visitor deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such visitor"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "visitors"
)]
#[debug_handler]
pub async fn delete_visitor_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::visitors::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted visitor");
    Ok(StatusCode::NO_CONTENT)
}
