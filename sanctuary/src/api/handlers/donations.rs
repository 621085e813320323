use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::donation::{CreateDonationRequest, Donation, UpdateDonationRequest};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

#[utoipa::path(
    get,
    path = "/api/v1/admin/donations",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Donation>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "donations"
)]
#[debug_handler]
pub async fn list_donations_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Donation>>, AppError> {
    Ok(Json(db::donations::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/donations/{id}",
    params(("id" = String, Path, description = "donation id")),
    responses(
    (status = 200, body = Donation),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such donation"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "donations"
)]
#[debug_handler]
pub async fn get_donation_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Donation>, AppError> {
    db::donations::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/donations",
    request_body = CreateDonationRequest,
    responses(
    (status = 201, body = Donation),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "donations"
)]
#[debug_handler]
pub async fn create_donation_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateDonationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::donations::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created donation");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/donations/{id}",
    params(("id" = String, Path, description = "donation id")),
    request_body = UpdateDonationRequest,
    responses(
    (status = 200, body = Donation),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such donation"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "donations"
)]
#[debug_handler]
pub async fn update_donation_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateDonationRequest>,
) -> Result<Json<Donation>, AppError> {
    db::donations::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/donations/{id}",
    params(("id" = String, Path, description = "donation id")),
    responses(
    (status = 204, description = "Donation deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such donation"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "donations"
)]
#[debug_handler]
pub async fn delete_donation_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::donations::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted donation");
    Ok(StatusCode::NO_CONTENT)
}
