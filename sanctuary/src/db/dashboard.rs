use chrono::{Datelike, Utc};
use sanctuary_core::models::dashboard::DashboardStats;
use sqlx::SqlitePool;

use super::now;

async fn count(pool: &SqlitePool, sql: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await
}

/// Aggregate counters shown on the staff dashboard.
pub async fn stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let today = Utc::now().date_naive();
    let month_start = format!("{:04}-{:02}-01", today.year(), today.month());

    let upcoming_events = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM events WHERE status = 'published' AND start_time >= ?",
    )
    .bind(now())
    .fetch_one(pool)
    .await?;

    let donations_this_month = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(amount), 0.0) FROM donations WHERE donated_on >= ?",
    )
    .bind(month_start)
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        active_members: count(
            pool,
            "SELECT COUNT(*) FROM members WHERE membership_status = 'active'",
        )
        .await?,
        total_members: count(pool, "SELECT COUNT(*) FROM members").await?,
        upcoming_events,
        pending_visitors: count(
            pool,
            "SELECT COUNT(*) FROM visitors WHERE follow_up_status = 'pending'",
        )
        .await?,
        scheduled_visits: count(
            pool,
            "SELECT COUNT(*) FROM pastoral_visits WHERE status = 'scheduled'",
        )
        .await?,
        donations_this_month,
    })
}
