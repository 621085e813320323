use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/admin/members",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Member>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "members"
)]
#[debug_handler]
pub async fn list_members_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Member>>, AppError> {
    Ok(Json(db::members::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/members/{id}",
    params(("id" = String, Path, description = "member id")),
    responses(
    (status = 200, body = Member),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such member"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "members"
)]
#[debug_handler]
pub async fn get_member_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    db::members::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/members",
    request_body = CreateMemberRequest,
    responses(
    (status = 201, body = Member),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "members"
)]
#[debug_handler]
pub async fn create_member_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::members::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created member");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/members/{id}",
    params(("id" = String, Path, description = "member id")),
    request_body = UpdateMemberRequest,
    responses(
    (status = 200, body = Member),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such member"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "members"
)]
#[debug_handler]
pub async fn update_member_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    db::members::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/members/{id}",
    params(("id" = String, Path, description = "member id")),
    responses(
    (status = 204, description = "Member deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such member"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "members"
)]
#[debug_handler]
pub async fn delete_member_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::members::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted member");
    Ok(StatusCode::NO_CONTENT)
}
