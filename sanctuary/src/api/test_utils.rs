//! Shared helpers for the HTTP-level tests.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;
use sanctuary_core::auth::{Role, SessionPrincipal};
use sanctuary_core::models::user::User;

use crate::api::auth_core::hash_password;
use crate::api::router::ApiRoutes;
use crate::app_state::{AppState, SharedAppState};
use crate::db;
use crate::settings::config::Settings;
use crate::stop_flag::StopFlag;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Fresh state with its own in-memory database and rate limit store.
pub async fn create_test_app_state() -> SharedAppState {
    create_test_app_state_with_settings(Settings::for_tests()).await
}

pub async fn create_test_app_state_with_settings(settings: Settings) -> SharedAppState {
    Arc::new(
        AppState::with_settings(settings, StopFlag::new())
            .await
            .expect("test state should build"),
    )
}

pub fn create_test_server(state: SharedAppState) -> TestServer {
    TestServer::new(ApiRoutes::create(state)).unwrap()
}

pub async fn create_user(state: &SharedAppState, email: &str, role: Role) -> User {
    let hash = hash_password(TEST_PASSWORD.to_string(), 4).await.unwrap();
    db::users::insert(state.db.pool(), email, "Test User", role, &hash)
        .await
        .unwrap()
}

pub fn session_token(state: &SharedAppState, user: &User) -> String {
    state
        .sessions
        .issue(&SessionPrincipal {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        })
        .unwrap()
}

/// Signed-in user of the given role, returned as an `Authorization` header.
pub async fn auth_header(state: &SharedAppState, role: Role) -> (HeaderName, HeaderValue) {
    let user = create_user(state, &format!("{}@example.org", role.as_str()), role).await;
    bearer(&session_token(state, &user))
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

/// Pins the rate limit identifier so tests do not share a budget by accident.
pub fn client_ip(ip: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("cf-connecting-ip"),
        HeaderValue::from_str(ip).unwrap(),
    )
}

pub async fn count_rows(state: &SharedAppState, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(state.db.pool())
        .await
        .unwrap()
}
