use sanctuary_core::models::visitor::{
    CreateVisitorRequest, FollowUpStatus, UpdateVisitorRequest, Visitor,
};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<Visitor>, sqlx::Error> {
    sqlx::query_as::<_, Visitor>(
        "SELECT * FROM visitors ORDER BY visit_date DESC, created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Visitor>, sqlx::Error> {
    sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// New visitors always start in the `pending` follow-up state.
pub async fn insert(
    pool: &SqlitePool,
    request: CreateVisitorRequest,
) -> Result<Visitor, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, Visitor>(
        "INSERT INTO visitors (id, first_name, last_name, email, phone, visit_date, how_heard, \
         prayer_request, follow_up_status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.first_name)
    .bind(request.last_name)
    .bind(request.email)
    .bind(request.phone)
    .bind(request.visit_date)
    .bind(request.how_heard)
    .bind(request.prayer_request)
    .bind(FollowUpStatus::Pending)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateVisitorRequest,
) -> Result<Option<Visitor>, sqlx::Error> {
    sqlx::query_as::<_, Visitor>(
        "UPDATE visitors SET \
         first_name = COALESCE(?, first_name), \
         last_name = COALESCE(?, last_name), \
         email = COALESCE(?, email), \
         phone = COALESCE(?, phone), \
         how_heard = COALESCE(?, how_heard), \
         prayer_request = COALESCE(?, prayer_request), \
         follow_up_status = COALESCE(?, follow_up_status), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.first_name)
    .bind(request.last_name)
    .bind(request.email)
    .bind(request.phone)
    .bind(request.how_heard)
    .bind(request.prayer_request)
    .bind(request.follow_up_status)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM visitors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
