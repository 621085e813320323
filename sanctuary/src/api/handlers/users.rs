use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::user::{CreateUserRequest, UpdateUserRequest, User};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::auth_core::hash_password;
use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<User>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "users"
)]
#[debug_handler]
pub async fn list_users_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(db::users::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "user id")),
    responses(
    (status = 200, body = User),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such user"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "users"
)]
#[debug_handler]
pub async fn get_user_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    db::users::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Creates a staff account. The password is stored as a bcrypt hash and
/// never returned.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = CreateUserRequest,
    responses(
    (status = 201, body = User),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 409, description = "Email already in use"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "users"
)]
#[debug_handler]
pub async fn create_user_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hash = hash_password(payload.password, state.settings.auth.bcrypt_cost).await?;
    let user = db::users::insert(
        state.db.pool(),
        &payload.email,
        &payload.name,
        payload.role,
        &hash,
    )
    .await?;
    info!(id = %user.id, role = user.role.as_str(), "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "user id")),
    request_body = UpdateUserRequest,
    responses(
    (status = 200, body = User),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such user"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "users"
)]
#[debug_handler]
pub async fn update_user_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    db::users::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "user id")),
    responses(
    (status = 204, description = "User deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such user"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "users"
)]
#[debug_handler]
pub async fn delete_user_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::users::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}
