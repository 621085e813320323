use axum::http::{header, HeaderValue, StatusCode};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use sanctuary_core::auth::Role;
use sanctuary_core::validation::FieldError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use super::rate_limiting::headers::{RATELIMIT_LIMIT, RATELIMIT_REMAINING, RATELIMIT_RESET};

/// JSON envelope of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Clone, Error, Debug)]
pub enum AppError {
    #[error("Too many requests")]
    RateLimited {
        limit: u32,
        reset_at_secs: u64,
        retry_after: u64,
    },

    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Unauthorized")]
    Unauthorized(Role),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input")]
    InvalidInput(Vec<FieldError>),

    #[error("Invalid request body")]
    MalformedBody,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Conflict")]
    Conflict,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::InvalidInput(vec![FieldError::new(field, message)])
    }

    fn get_error_msg(&self) -> (StatusCode, ErrorBody) {
        let status = match self {
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unauthenticated
            | AppError::Unauthorized(_)
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) | AppError::MalformedBody => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal causes stay in the log.
        let message = match self {
            AppError::InternalServerError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: message,
            retry_after: match self {
                AppError::RateLimited { retry_after, .. } => Some(*retry_after),
                _ => None,
            },
            details: match self {
                AppError::InvalidInput(details) => Some(details.clone()),
                _ => None,
            },
        };

        (status, body)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(app_error) = e.downcast_ref::<AppError>() {
            return app_error.clone();
        }
        AppError::InternalServerError(format!("{e:#}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e.as_database_error() {
            Some(db) if db.is_unique_violation() => AppError::Conflict,
            Some(db) if db.is_foreign_key_violation() => {
                AppError::invalid_field("memberId", "references an unknown member")
            }
            _ => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::InternalServerError(cause) = &self {
            error!("Request failed: {}", cause);
        }

        let (status, body) = self.get_error_msg();
        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimited {
            limit,
            reset_at_secs,
            retry_after,
        } = self
        {
            let headers = response.headers_mut();
            headers.insert(RATELIMIT_LIMIT, HeaderValue::from(limit));
            headers.insert(RATELIMIT_REMAINING, HeaderValue::from(0u32));
            headers.insert(RATELIMIT_RESET, HeaderValue::from(reset_at_secs));
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rate_limited_envelope_and_headers() {
        let response = AppError::RateLimited {
            limit: 10,
            reset_at_secs: 1_700_000_060,
            retry_after: 42,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let headers = response.headers();
        assert_eq!(headers.get(RATELIMIT_LIMIT).unwrap(), "10");
        assert_eq!(headers.get(RATELIMIT_REMAINING).unwrap(), "0");
        assert_eq!(headers.get(RATELIMIT_RESET).unwrap(), "1700000060");
        assert_eq!(headers.get(header::RETRY_AFTER).unwrap(), "42");

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "error": "Too many requests", "retryAfter": 42 })
        );
    }

    #[tokio::test]
    async fn test_role_denial_looks_like_missing_session() {
        let denied = AppError::Unauthorized(Role::Member).into_response();
        let anonymous = AppError::Unauthenticated.into_response();

        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(denied).await, body_json(anonymous).await);
    }

    #[tokio::test]
    async fn test_invalid_input_lists_details() {
        let response = AppError::InvalidInput(vec![
            FieldError::new("title", "is required"),
            FieldError::new("startTime", "must be a date"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["details"][0]["field"], "title");
        assert_eq!(body["details"][1]["message"], "must be a date");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_the_cause() {
        let response =
            AppError::InternalServerError("disk I/O error at /var/lib/db".into()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_anyhow_keeps_app_errors() {
        let error: AppError = anyhow::Error::new(AppError::NotFound).into();
        assert!(matches!(error, AppError::NotFound));
    }
}
