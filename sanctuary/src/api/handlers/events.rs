use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sanctuary_core::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use sanctuary_core::models::ListQuery;
use tracing::info;

use crate::api::error::AppError;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::app_state::SharedAppState;
use crate::db;

/// Published events for the public site, soonest first.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Event>),
    (status = 429, description = "Too many requests"),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn list_published_events_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(db::events::list_published(state.db.pool(), &query).await?))
}

/// Drafts and cancelled events answer 404 here.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "event id")),
    responses(
    (status = 200, body = Event),
    (status = 404, description = "No such published event"),
    ),
    tag = "public"
)]
#[debug_handler]
pub async fn get_published_event_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    db::events::get_published(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/events",
    params(ListQuery),
    responses(
    (status = 200, body = Vec<Event>),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 429, description = "Too many requests"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "events"
)]
#[debug_handler]
pub async fn list_events_handler(
    State(state): State<SharedAppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(db::events::list(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/events/{id}",
    params(("id" = String, Path, description = "event id")),
    responses(
    (status = 200, body = Event),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such event"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "events"
)]
#[debug_handler]
pub async fn get_event_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    db::events::get(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/events",
    request_body = CreateEventRequest,
    responses(
    (status = 201, body = Event),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "events"
)]
#[debug_handler]
pub async fn create_event_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(payload): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = db::events::insert(state.db.pool(), payload).await?;
    info!(id = %created.id, "Created event");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/events/{id}",
    params(("id" = String, Path, description = "event id")),
    request_body = UpdateEventRequest,
    responses(
    (status = 200, body = Event),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such event"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "events"
)]
#[debug_handler]
pub async fn update_event_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    db::events::update(state.db.pool(), &id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/events/{id}",
    params(("id" = String, Path, description = "event id")),
    responses(
    (status = 204, description = "Event deleted"),
    (status = 401, description = "Session is missing or the role is not allowed"),
    (status = 404, description = "No such event"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "events"
)]
#[debug_handler]
pub async fn delete_event_handler(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::events::delete(state.db.pool(), &id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted event");
    Ok(StatusCode::NO_CONTENT)
}
