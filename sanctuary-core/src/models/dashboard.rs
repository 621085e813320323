use serde::Serialize;
use utoipa::ToSchema;

/// Headline numbers for the admin panel landing page
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_members: i64,
    pub total_members: i64,
    pub upcoming_events: i64,
    pub pending_visitors: i64,
    pub scheduled_visits: i64,
    pub donations_this_month: f64,
}
