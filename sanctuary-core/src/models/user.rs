use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;
use crate::validation::{FieldError, Validate, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A panel account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .email("email", &self.email)
            .required("name", &self.name, 200)
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LENGTH,
                "password",
                "must be at least 8 characters",
            )
            .max_length("password", &self.password, 128)
            .finish()
    }

    fn raw_fields() -> &'static [&'static str] {
        &["password"]
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required_if_present("name", self.name.as_deref(), 200)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .required("email", &self.email, 254)
            .required("password", &self.password, 128)
            .finish()
    }

    fn raw_fields() -> &'static [&'static str] {
        &["password"]
    }
}
