use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use config::{Config, File};
use sanctuary::api::router::ApiRoutes;
use sanctuary::settings::config::Settings;
use sanctuary::stop_flag::StopFlag;
use sanctuary::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

fn test_settings() -> Settings {
    Config::builder()
        .add_source(File::with_name("tests/test_settings"))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

async fn bootstrapped_state() -> Arc<AppState> {
    let state = AppState::with_settings(test_settings(), StopFlag::new())
        .await
        .unwrap();
    state.ensure_bootstrap_admin().await.unwrap();
    Arc::new(state)
}

/// The configured admin can log in and manage users on a fresh database
#[tokio::test]
async fn test_bootstrap_admin_can_log_in() {
    let server = TestServer::new(ApiRoutes::create(bootstrapped_state().await)).unwrap();

    let login = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "admin@example.org", "password": "change-me-please" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);

    let cookie = login
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("sanctuary_session="));
    assert!(cookie.contains("Max-Age=3600"));

    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();
    let users = server
        .get("/api/v1/admin/users")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
        .await;
    assert_eq!(users.status_code(), StatusCode::OK);

    let users = users.json::<Value>();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "admin");
    assert_eq!(users[0]["name"], "Administrator");
}

/// Running the bootstrap twice never creates a second admin
#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let state = bootstrapped_state().await;
    state.ensure_bootstrap_admin().await.unwrap();

    let count = sanctuary::db::users::count(state.db.pool()).await.unwrap();
    assert_eq!(count, 1);
}

/// A bootstrap entry in the config does not touch a database that already has users
#[tokio::test]
async fn test_bootstrap_skipped_when_users_exist() {
    let state = AppState::with_settings(test_settings(), StopFlag::new())
        .await
        .unwrap();
    sanctuary::db::users::insert(
        state.db.pool(),
        "pastor@example.org",
        "Pastor",
        sanctuary_core::auth::Role::Leader,
        "not-a-real-hash",
    )
    .await
    .unwrap();

    state.ensure_bootstrap_admin().await.unwrap();

    let credentials =
        sanctuary::db::users::find_credentials_by_email(state.db.pool(), "admin@example.org")
            .await
            .unwrap();
    assert!(credentials.is_none());
}
