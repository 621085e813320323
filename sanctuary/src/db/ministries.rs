use sanctuary_core::models::ministry::{CreateMinistryRequest, Ministry, UpdateMinistryRequest};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<Ministry>, sqlx::Error> {
    sqlx::query_as::<_, Ministry>("SELECT * FROM ministries ORDER BY name LIMIT ? OFFSET ?")
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(pool)
        .await
}

pub async fn list_active(
    pool: &SqlitePool,
    query: &ListQuery,
) -> Result<Vec<Ministry>, sqlx::Error> {
    sqlx::query_as::<_, Ministry>(
        "SELECT * FROM ministries WHERE is_active = 1 ORDER BY name LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Ministry>, sqlx::Error> {
    sqlx::query_as::<_, Ministry>("SELECT * FROM ministries WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    request: CreateMinistryRequest,
) -> Result<Ministry, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, Ministry>(
        "INSERT INTO ministries (id, name, description, leader_name, meeting_schedule, \
         is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.name)
    .bind(request.description)
    .bind(request.leader_name)
    .bind(request.meeting_schedule)
    .bind(request.is_active)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateMinistryRequest,
) -> Result<Option<Ministry>, sqlx::Error> {
    sqlx::query_as::<_, Ministry>(
        "UPDATE ministries SET \
         name = COALESCE(?, name), \
         description = COALESCE(?, description), \
         leader_name = COALESCE(?, leader_name), \
         meeting_schedule = COALESCE(?, meeting_schedule), \
         is_active = COALESCE(?, is_active), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.name)
    .bind(request.description)
    .bind(request.leader_name)
    .bind(request.meeting_schedule)
    .bind(request.is_active)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ministries WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
