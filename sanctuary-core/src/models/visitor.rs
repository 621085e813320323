use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    #[default]
    Pending,
    Contacted,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub visit_date: String,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
    pub follow_up_status: FollowUpStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Visitor card submitted from the public site. Follow-up state is always
/// `pending` on creation and only staff can change it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub visit_date: String,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
}

impl Validate for CreateVisitorRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("firstName", &self.first_name, 100)
            .required("lastName", &self.last_name, 100)
            .optional_email("email", self.email.as_deref())
            .optional_max_length("phone", self.phone.as_deref(), 40)
            .date("visitDate", &self.visit_date)
            .optional_max_length("howHeard", self.how_heard.as_deref(), 200)
            .optional_max_length("prayerRequest", self.prayer_request.as_deref(), 2000)
            .check(
                self.email.as_deref().is_some_and(|e| !e.is_empty())
                    || self.phone.as_deref().is_some_and(|p| !p.is_empty()),
                "email",
                "an email or phone number is required",
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
    pub follow_up_status: Option<FollowUpStatus>,
}

impl Validate for UpdateVisitorRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required_if_present("firstName", self.first_name.as_deref(), 100)
            .required_if_present("lastName", self.last_name.as_deref(), 100)
            .optional_email("email", self.email.as_deref())
            .optional_max_length("phone", self.phone.as_deref(), 40)
            .optional_max_length("howHeard", self.how_heard.as_deref(), 200)
            .optional_max_length("prayerRequest", self.prayer_request.as_deref(), 2000)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_needs_a_contact_channel() {
        let request: CreateVisitorRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "visitDate": "2025-06-01"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_visitor_with_phone_is_valid() {
        let request: CreateVisitorRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "phone": "+1 555 0100",
            "visitDate": "2025-06-01"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
