use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<String>,
    pub joined_on: Option<String>,
    pub membership_status: MembershipStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<String>,
    pub joined_on: Option<String>,
    #[serde(default)]
    pub membership_status: MembershipStatus,
    pub notes: Option<String>,
}

impl Validate for CreateMemberRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("firstName", &self.first_name, 100)
            .required("lastName", &self.last_name, 100)
            .optional_email("email", self.email.as_deref())
            .optional_max_length("phone", self.phone.as_deref(), 40)
            .optional_max_length("address", self.address.as_deref(), 500)
            .optional_date("birthDate", self.birth_date.as_deref())
            .optional_date("joinedOn", self.joined_on.as_deref())
            .optional_max_length("notes", self.notes.as_deref(), 5000)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<String>,
    pub joined_on: Option<String>,
    pub membership_status: Option<MembershipStatus>,
    pub notes: Option<String>,
}

impl Validate for UpdateMemberRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required_if_present("firstName", self.first_name.as_deref(), 100)
            .required_if_present("lastName", self.last_name.as_deref(), 100)
            .optional_email("email", self.email.as_deref())
            .optional_max_length("phone", self.phone.as_deref(), 40)
            .optional_max_length("address", self.address.as_deref(), 500)
            .optional_date("birthDate", self.birth_date.as_deref())
            .optional_date("joinedOn", self.joined_on.as_deref())
            .optional_max_length("notes", self.notes.as_deref(), 5000)
            .finish()
    }
}
