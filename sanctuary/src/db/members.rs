use sanctuary_core::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "SELECT * FROM members ORDER BY last_name, first_name LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    request: CreateMemberRequest,
) -> Result<Member, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, Member>(
        "INSERT INTO members (id, first_name, last_name, email, phone, address, birth_date, \
         joined_on, membership_status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.first_name)
    .bind(request.last_name)
    .bind(request.email)
    .bind(request.phone)
    .bind(request.address)
    .bind(request.birth_date)
    .bind(request.joined_on)
    .bind(request.membership_status)
    .bind(request.notes)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateMemberRequest,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "UPDATE members SET \
         first_name = COALESCE(?, first_name), \
         last_name = COALESCE(?, last_name), \
         email = COALESCE(?, email), \
         phone = COALESCE(?, phone), \
         address = COALESCE(?, address), \
         birth_date = COALESCE(?, birth_date), \
         joined_on = COALESCE(?, joined_on), \
         membership_status = COALESCE(?, membership_status), \
         notes = COALESCE(?, notes), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.first_name)
    .bind(request.last_name)
    .bind(request.email)
    .bind(request.phone)
    .bind(request.address)
    .bind(request.birth_date)
    .bind(request.joined_on)
    .bind(request.membership_status)
    .bind(request.notes)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM members WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
