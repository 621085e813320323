use sanctuary_core::models::live_stream::{
    CreateLiveStreamRequest, LiveStream, UpdateLiveStreamRequest,
};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<LiveStream>, sqlx::Error> {
    sqlx::query_as::<_, LiveStream>(
        "SELECT * FROM live_streams ORDER BY scheduled_at DESC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

/// Streams visible to the public: anything not cancelled, soonest first.
pub async fn list_public(
    pool: &SqlitePool,
    query: &ListQuery,
) -> Result<Vec<LiveStream>, sqlx::Error> {
    sqlx::query_as::<_, LiveStream>(
        "SELECT * FROM live_streams WHERE status != 'cancelled' \
         ORDER BY scheduled_at ASC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<LiveStream>, sqlx::Error> {
    sqlx::query_as::<_, LiveStream>("SELECT * FROM live_streams WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    request: CreateLiveStreamRequest,
) -> Result<LiveStream, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, LiveStream>(
        "INSERT INTO live_streams (id, title, description, stream_url, platform, scheduled_at, \
         status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.title)
    .bind(request.description)
    .bind(request.stream_url)
    .bind(request.platform)
    .bind(request.scheduled_at)
    .bind(request.status)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateLiveStreamRequest,
) -> Result<Option<LiveStream>, sqlx::Error> {
    sqlx::query_as::<_, LiveStream>(
        "UPDATE live_streams SET \
         title = COALESCE(?, title), \
         description = COALESCE(?, description), \
         stream_url = COALESCE(?, stream_url), \
         platform = COALESCE(?, platform), \
         scheduled_at = COALESCE(?, scheduled_at), \
         status = COALESCE(?, status), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.title)
    .bind(request.description)
    .bind(request.stream_url)
    .bind(request.platform)
    .bind(request.scheduled_at)
    .bind(request.status)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM live_streams WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
