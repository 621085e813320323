use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub status: EventStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("title", &self.title, 200)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .optional_max_length("location", self.location.as_deref(), 300)
            .date("startTime", &self.start_time)
            .optional_date("endTime", self.end_time.as_deref())
            .optional_max_length("category", self.category.as_deref(), 100)
            .optional_http_url("imageUrl", self.image_url.as_deref())
            .check(
                ends_after_start(&self.start_time, self.end_time.as_deref()),
                "endTime",
                "must not be before startTime",
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<EventStatus>,
}

impl Validate for UpdateEventRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut validator = Validator::new();
        validator
            .required_if_present("title", self.title.as_deref(), 200)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .optional_max_length("location", self.location.as_deref(), 300)
            .optional_date("endTime", self.end_time.as_deref())
            .optional_max_length("category", self.category.as_deref(), 100)
            .optional_http_url("imageUrl", self.image_url.as_deref());
        if let Some(start_time) = &self.start_time {
            validator.date("startTime", start_time).check(
                ends_after_start(start_time, self.end_time.as_deref()),
                "endTime",
                "must not be before startTime",
            );
        }
        validator.finish()
    }
}

/// ISO-8601 strings of the same shape order lexicographically
fn ends_after_start(start: &str, end: Option<&str>) -> bool {
    match end {
        Some(end) if !end.is_empty() && end.len() == start.len() => end >= start,
        _ => true,
    }
}
