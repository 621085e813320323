use sanctuary_core::models::donation::{CreateDonationRequest, Donation, UpdateDonationRequest};
use sanctuary_core::models::ListQuery;
use sqlx::SqlitePool;

use super::{new_id, now};

pub async fn list(pool: &SqlitePool, query: &ListQuery) -> Result<Vec<Donation>, sqlx::Error> {
    sqlx::query_as::<_, Donation>(
        "SELECT * FROM donations ORDER BY donated_on DESC, created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Donation>, sqlx::Error> {
    sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    request: CreateDonationRequest,
) -> Result<Donation, sqlx::Error> {
    let timestamp = now();
    sqlx::query_as::<_, Donation>(
        "INSERT INTO donations (id, member_id, donor_name, amount, fund, method, donated_on, \
         notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(request.member_id)
    .bind(request.donor_name)
    .bind(request.amount)
    .bind(request.fund)
    .bind(request.method)
    .bind(request.donated_on)
    .bind(request.notes)
    .bind(&timestamp)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    request: UpdateDonationRequest,
) -> Result<Option<Donation>, sqlx::Error> {
    sqlx::query_as::<_, Donation>(
        "UPDATE donations SET \
         donor_name = COALESCE(?, donor_name), \
         amount = COALESCE(?, amount), \
         fund = COALESCE(?, fund), \
         method = COALESCE(?, method), \
         donated_on = COALESCE(?, donated_on), \
         notes = COALESCE(?, notes), \
         updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(request.donor_name)
    .bind(request.amount)
    .bind(request.fund)
    .bind(request.method)
    .bind(request.donated_on)
    .bind(request.notes)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM donations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
