//! Typed payload validation.
//!
//! Payloads are sanitized and deserialized before they get here; validation
//! only checks content and reports every problem at once as a list of
//! [`FieldError`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile"));

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;

    /// Top-level fields that skip sanitization, e.g. passwords
    fn raw_fields() -> &'static [&'static str] {
        &[]
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str, max_len: usize) -> &mut Self {
        if value.trim().is_empty() {
            return self.check(false, field, "is required");
        }
        self.max_length(field, value, max_len)
    }

    /// Same as [`required`](Self::required), skipped when the field is absent
    pub fn required_if_present(
        &mut self,
        field: &str,
        value: Option<&str>,
        max_len: usize,
    ) -> &mut Self {
        match value {
            Some(value) => self.required(field, value, max_len),
            None => self,
        }
    }

    pub fn max_length(&mut self, field: &str, value: &str, max_len: usize) -> &mut Self {
        let ok = value.chars().count() <= max_len;
        self.check(ok, field, &format!("must be at most {max_len} characters"))
    }

    pub fn optional_max_length(
        &mut self,
        field: &str,
        value: Option<&str>,
        max_len: usize,
    ) -> &mut Self {
        match value {
            Some(value) => self.max_length(field, value, max_len),
            None => self,
        }
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(EMAIL.is_match(value), field, "must be a valid email address")
            .max_length(field, value, 254)
    }

    /// Absent and empty values are accepted
    pub fn optional_email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.email(field, value),
            _ => self,
        }
    }

    pub fn date(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            is_valid_date(value),
            field,
            "must be a date (YYYY-MM-DD) or date-time (RFC 3339)",
        )
    }

    pub fn optional_date(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.date(field, value),
            _ => self,
        }
    }

    pub fn http_url(&mut self, field: &str, value: &str) -> &mut Self {
        let lower = value.to_lowercase();
        self.check(
            lower.starts_with("https://") || lower.starts_with("http://"),
            field,
            "must be an http(s) URL",
        )
        .max_length(field, value, 2048)
    }

    pub fn optional_http_url(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.http_url(field, value),
            _ => self,
        }
    }

    pub fn positive_amount(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(
            value.is_finite() && value > 0.0,
            field,
            "must be a positive amount",
        )
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// Accepts `2024-12-24`, `2024-12-24T18:30`, `2024-12-24T18:30:00` and RFC 3339.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_errors() {
        let result = Validator::new()
            .required("title", "   ", 100)
            .email("email", "not-an-email")
            .date("startTime", "next sunday")
            .finish();

        let errors = result.unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "email", "startTime"]);
    }

    #[test]
    fn test_valid_values_pass() {
        let result = Validator::new()
            .required("title", "Easter Service", 100)
            .email("email", "pastor@example.org")
            .date("startTime", "2025-04-20T10:00")
            .date("date", "2025-04-20")
            .date("utc", "2025-04-20T10:00:00Z")
            .http_url("streamUrl", "https://youtube.com/live/abc")
            .positive_amount("amount", 25.5)
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_max_length_counts_chars() {
        assert!(Validator::new().max_length("name", "ééé", 3).finish().is_ok());
        assert!(Validator::new().max_length("name", "éééé", 3).finish().is_err());
    }

    #[test]
    fn test_optional_checks_skip_missing_values() {
        let result = Validator::new()
            .required_if_present("title", None, 10)
            .optional_email("email", None)
            .optional_email("email", Some(""))
            .optional_date("date", None)
            .optional_http_url("url", Some(""))
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_amount_must_be_positive_and_finite() {
        assert!(Validator::new().positive_amount("amount", 0.0).finish().is_err());
        assert!(Validator::new().positive_amount("amount", -3.0).finish().is_err());
        assert!(Validator::new()
            .positive_amount("amount", f64::NAN)
            .finish()
            .is_err());
    }
}
