use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Ministry {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub leader_name: Option<String>,
    pub meeting_schedule: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMinistryRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_name: Option<String>,
    pub meeting_schedule: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Validate for CreateMinistryRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("name", &self.name, 150)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .optional_max_length("leaderName", self.leader_name.as_deref(), 200)
            .optional_max_length("meetingSchedule", self.meeting_schedule.as_deref(), 200)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMinistryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_name: Option<String>,
    pub meeting_schedule: Option<String>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateMinistryRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required_if_present("name", self.name.as_deref(), 150)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .optional_max_length("leaderName", self.leader_name.as_deref(), 200)
            .optional_max_length("meetingSchedule", self.meeting_schedule.as_deref(), 200)
            .finish()
    }
}
