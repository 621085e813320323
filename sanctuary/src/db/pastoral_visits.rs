use sanctuary_core::models::pastoral_visit::{
    CreatePastoralVisitRequest, PastoralVisit, UpdatePastoralVisitRequest,
};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(
    pool: &SqlitePool,
    query: &ListQuery,
) -> Result<Vec<PastoralVisit>, sqlx::Error> {
    sqlx::query_as::<_, PastoralVisit>(
        "SELECT * FROM pastoral_visits ORDER BY scheduled_for DESC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<PastoralVisit>, sqlx::Error> {
    sqlx::query_as::<_, PastoralVisit>("SELECT * FROM pastoral_visits WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    request: CreatePastoralVisitRequest,
) -> Result<PastoralVisit, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, PastoralVisit>(
        "INSERT INTO pastoral_visits (id, member_id, visitee_name, pastor_name, visit_type, \
         scheduled_for, status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.member_id)
    .bind(request.visitee_name)
    .bind(request.pastor_name)
    .bind(request.visit_type)
    .bind(request.scheduled_for)
    .bind(request.status)
    .bind(request.notes)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdatePastoralVisitRequest,
) -> Result<Option<PastoralVisit>, sqlx::Error> {
    sqlx::query_as::<_, PastoralVisit>(
        "UPDATE pastoral_visits SET \
         visitee_name = COALESCE(?, visitee_name), \
         pastor_name = COALESCE(?, pastor_name), \
         visit_type = COALESCE(?, visit_type), \
         scheduled_for = COALESCE(?, scheduled_for), \
         status = COALESCE(?, status), \
         notes = COALESCE(?, notes), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.visitee_name)
    .bind(request.pastor_name)
    .bind(request.visit_type)
    .bind(request.scheduled_for)
    .bind(request.status)
    .bind(request.notes)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pastoral_visits WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
