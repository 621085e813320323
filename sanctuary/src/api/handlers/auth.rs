use axum::{
    debug_handler,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};
use sanctuary_core::auth::SessionPrincipal;
use sanctuary_core::models::user::LoginRequest;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::auth_core::verify_password;
use crate::api::error::AppError;
use crate::api::extract::ValidatedJson;
use crate::app_state::SharedAppState;
use crate::db;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub user: SessionPrincipal,
    /// Same value as the session cookie, for clients that send a bearer
    /// header instead.
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
    (status = 200, body = LoginResponse, description = "Session cookie is set"),
    (status = 400, description = "Invalid request body or invalid input"),
    (status = 401, description = "Invalid credentials"),
    (status = 429, description = "Too many login attempts"),
    ),
    tag = "auth"
)]
#[debug_handler]
pub async fn login_handler(
    State(state): State<SharedAppState>,
    ValidatedJson(form): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = db::users::find_credentials_by_email(state.db.pool(), &form.email).await?;

    let Some(credentials) = credentials else {
        warn!("Login failed: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(form.password, credentials.password_hash).await {
        warn!(user_id = %credentials.id, "Login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let principal = SessionPrincipal {
        user_id: credentials.id,
        email: credentials.email,
        role: credentials.role,
    };
    let token = state.sessions.issue(&principal)?;
    info!(user_id = %principal.user_id, role = principal.role.as_str(), "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, state.sessions.session_cookie(&token))]),
        Json(LoginResponse {
            user: principal,
            token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
    (status = 200, description = "Session cookie is cleared"),
    ),
    tag = "auth"
)]
#[debug_handler]
pub async fn logout_handler(State(state): State<SharedAppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, state.sessions.clear_cookie())]),
        Json(serde_json::json!({ "success": true })),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
    (status = 200, body = SessionPrincipal),
    (status = 401, description = "No valid session"),
    ),
    security(
        ("sessionCookie" = []),
        ("bearerAuth" = [])
    ),
    tag = "auth"
)]
#[debug_handler]
pub async fn session_handler(Extension(principal): Extension<SessionPrincipal>) -> impl IntoResponse {
    Json(principal)
}
