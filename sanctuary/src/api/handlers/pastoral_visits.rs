use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::pastoral_visit::{
    CreatePastoralVisitRequest, PastoralVisit, UpdatePastoralVisitRequest,
};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/admin/pastoral-visits",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<PastoralVisit>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "pastoral-visits"
)]
#[debug_handler]
pub async fn list_pastoral_visits_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<PastoralVisit>>, AppError> {
    Ok(Json(db::pastoral_visits::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/pastoral-visits/{id}",
    params(("id" = String, Path, description = "pastoral visit id")),
    responses(
    (status = 200, body = PastoralVisit),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such pastoral visit"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "pastoral-visits"
)]
#[debug_handler]
pub async fn get_pastoral_visit_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<PastoralVisit>, AppError> {
    db::pastoral_visits::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/pastoral-visits",
    request_body = CreatePastoralVisitRequest,
    responses(
    (status = 201, body = PastoralVisit),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "pastoral-visits"
)]
#[debug_handler]
pub async fn create_pastoral_visit_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreatePastoralVisitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::pastoral_visits::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created pastoral visit");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/pastoral-visits/{id}",
    params(("id" = String, Path, description = "pastoral visit id")),
    request_body = UpdatePastoralVisitRequest,
    responses(
    (status = 200, body = PastoralVisit),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such pastoral visit"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "pastoral-visits"
)]
#[debug_handler]
pub async fn update_pastoral_visit_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdatePastoralVisitRequest>,
) -> Result<Json<PastoralVisit>, AppError> {
    db::pastoral_visits::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/pastoral-visits/{id}",
    params(("id" = String, Path, description = "pastoral visit id")),
    responses(
    (status = 204, description = "Pastoral visit deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such pastoral visit"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "pastoral-visits"
)]
#[debug_handler]
pub async fn delete_pastoral_visit_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::pastoral_visits::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted pastoral visit");
    Ok(StatusCode::NO_CONTENT)
}
