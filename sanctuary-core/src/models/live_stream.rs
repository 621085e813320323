use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    #[default]
    Scheduled,
    Live,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub stream_url: String,
    pub platform: Option<String>,
    pub scheduled_at: String,
    pub status: StreamStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveStreamRequest {
    pub title: String,
    pub description: Option<String>,
    pub stream_url: String,
    pub platform: Option<String>,
    pub scheduled_at: String,
    #[serde(default)]
    pub status: StreamStatus,
}

impl Validate for CreateLiveStreamRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("title", &self.title, 200)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .http_url("streamUrl", &self.stream_url)
            .optional_max_length("platform", self.platform.as_deref(), 50)
            .date("scheduledAt", &self.scheduled_at)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLiveStreamRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub stream_url: Option<String>,
    pub platform: Option<String>,
    pub scheduled_at: Option<String>,
    pub status: Option<StreamStatus>,
}

impl Validate for UpdateLiveStreamRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut validator = Validator::new();
        validator
            .required_if_present("title", self.title.as_deref(), 200)
            .optional_max_length("description", self.description.as_deref(), 5000)
            .optional_max_length("platform", self.platform.as_deref(), 50)
            .optional_date("scheduledAt", self.scheduled_at.as_deref());
        if let Some(url) = &self.stream_url {
            validator.http_url("streamUrl", url);
        }
        validator.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url_must_be_http() {
        let request = CreateLiveStreamRequest {
            title: "Sunday Worship".to_string(),
            description: None,
            stream_url: "rtmp://ingest.example.org/live".to_string(),
            platform: Some("youtube".to_string()),
            scheduled_at: "2025-05-04T10:00".to_string(),
            status: StreamStatus::Scheduled,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].field, "streamUrl");
    }
}
