use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    #[default]
    Home,
    Hospital,
    Office,
    Phone,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PastoralVisit {
    pub id: String,
    pub member_id: Option<String>,
    pub visitee_name: String,
    pub pastor_name: String,
    pub visit_type: VisitType,
    pub scheduled_for: String,
    pub status: VisitStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePastoralVisitRequest {
    pub member_id: Option<String>,
    pub visitee_name: String,
    pub pastor_name: String,
    #[serde(default)]
    pub visit_type: VisitType,
    pub scheduled_for: String,
    #[serde(default)]
    pub status: VisitStatus,
    pub notes: Option<String>,
}

impl Validate for CreatePastoralVisitRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("visiteeName", &self.visitee_name, 200)
            .required("pastorName", &self.pastor_name, 200)
            .date("scheduledFor", &self.scheduled_for)
            .optional_max_length("notes", self.notes.as_deref(), 5000)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePastoralVisitRequest {
    pub visitee_name: Option<String>,
    pub pastor_name: Option<String>,
    pub visit_type: Option<VisitType>,
    pub scheduled_for: Option<String>,
    pub status: Option<VisitStatus>,
    pub notes: Option<String>,
}

impl Validate for UpdatePastoralVisitRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required_if_present("visiteeName", self.visitee_name.as_deref(), 200)
            .required_if_present("pastorName", self.pastor_name.as_deref(), 200)
            .optional_date("scheduledFor", self.scheduled_for.as_deref())
            .optional_max_length("notes", self.notes.as_deref(), 5000)
            .finish()
    }
}
