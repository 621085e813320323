use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{FieldError, Validate, Validator};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DonationFund {
    #[default]
    Tithe,
    Offering,
    Missions,
    Building,
    Benevolence,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Check,
    Card,
    Transfer,
    Online,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub member_id: Option<String>,
    pub donor_name: Option<String>,
    pub amount: f64,
    pub fund: DonationFund,
    pub method: PaymentMethod,
    pub donated_on: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub member_id: Option<String>,
    pub donor_name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub fund: DonationFund,
    #[serde(default)]
    pub method: PaymentMethod,
    pub donated_on: String,
    pub notes: Option<String>,
}

impl Validate for CreateDonationRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .positive_amount("amount", self.amount)
            .date("donatedOn", &self.donated_on)
            .optional_max_length("donorName", self.donor_name.as_deref(), 200)
            .optional_max_length("notes", self.notes.as_deref(), 2000)
            .check(
                self.member_id.is_some() || self.donor_name.is_some(),
                "donorName",
                "is required when no memberId is given",
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationRequest {
    pub donor_name: Option<String>,
    pub amount: Option<f64>,
    pub fund: Option<DonationFund>,
    pub method: Option<PaymentMethod>,
    pub donated_on: Option<String>,
    pub notes: Option<String>,
}

impl Validate for UpdateDonationRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut validator = Validator::new();
        if let Some(amount) = self.amount {
            validator.positive_amount("amount", amount);
        }
        validator
            .optional_date("donatedOn", self.donated_on.as_deref())
            .optional_max_length("donorName", self.donor_name.as_deref(), 200)
            .optional_max_length("notes", self.notes.as_deref(), 2000)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_donation_needs_a_name() {
        let request: CreateDonationRequest = serde_json::from_value(serde_json::json!({
            "amount": 50.0,
            "donatedOn": "2025-03-02"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].field, "donorName");
    }

    #[test]
    fn test_rejects_negative_amount() {
        let request: CreateDonationRequest = serde_json::from_value(serde_json::json!({
            "amount": -5,
            "donorName": "Anonymous",
            "fund": "missions",
            "method": "online",
            "donatedOn": "2025-03-02"
        }))
        .unwrap();
        assert_eq!(request.fund, DonationFund::Missions);
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].field, "amount");
    }
}
