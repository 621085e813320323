use sanctuary_core::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_time DESC LIMIT ? OFFSET ?")
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(pool)
        .await
}

pub async fn list_published(
    pool: &SqlitePool,
    query: &ListQuery,
) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT * FROM events WHERE status = 'published' ORDER BY start_time ASC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_published(pool: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ? AND status = 'published'")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, request: CreateEventRequest) -> Result<Event, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (id, title, description, location, start_time, end_time, category, \
         image_url, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.title)
    .bind(request.description)
    .bind(request.location)
    .bind(request.start_time)
    .bind(request.end_time)
    .bind(request.category)
    .bind(request.image_url)
    .bind(request.status)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateEventRequest,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET \
         title = COALESCE(?, title), \
         description = COALESCE(?, description), \
         location = COALESCE(?, location), \
         start_time = COALESCE(?, start_time), \
         end_time = COALESCE(?, end_time), \
         category = COALESCE(?, category), \
         image_url = COALESCE(?, image_url), \
         status = COALESCE(?, status), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.title)
    .bind(request.description)
    .bind(request.location)
    .bind(request.start_time)
    .bind(request.end_time)
    .bind(request.category)
    .bind(request.image_url)
    .bind(request.status)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
