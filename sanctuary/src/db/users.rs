use sanctuary_core::auth::Role;
use sanctuary_core::models::user::{UpdateUserRequest, User};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

/// Login lookup row. Never serialized; the hash stays inside the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

const USER_COLUMNS: &str = "id, email, name, role, created_at, updated_at";

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY email LIMIT ? OFFSET ?"
    ))
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, email, role, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Stores a user with an already computed password hash.
pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    role: Role,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, email, name, role, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    ))
    .bind(new_id())
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(password_hash)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateUserRequest,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET \
         name = COALESCE(?, name), \
         role = COALESCE(?, role), \
         updated_at = ? \
         WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(request.name)
    .bind(request.role)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
