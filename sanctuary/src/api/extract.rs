use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
};
use sanctuary_core::utils::sanitize::sanitize_except;
use sanctuary_core::validation::{FieldError, Validate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::error::AppError;

/// JSON body that has been parsed, sanitized, typed and validated, in that
/// order.
///
/// - body over the configured size limit: `413 Payload too large`
/// - unreadable or non-JSON body: `400 Invalid request body`
/// - JSON of the wrong shape or failing [`Validate`]: `400 Invalid input`
///   with field details
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!("Could not read request body: {}", e);
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::MalformedBody
            }
        })?;

        let raw: Value = serde_json::from_slice(&bytes).map_err(|e| {
            debug!("Request body is not JSON: {}", e);
            AppError::MalformedBody
        })?;

        let clean = sanitize_except(raw, T::raw_fields());

        let payload: T = serde_json::from_value(clean)
            .map_err(|e| AppError::InvalidInput(vec![FieldError::new("body", e.to_string())]))?;

        payload.validate().map_err(AppError::InvalidInput)?;

        Ok(ValidatedJson(payload))
    }
}

/// Query string parsed into `T`. A bad parameter is reported like any other
/// invalid field, under `query`.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::invalid_field("query", e.body_text()))?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::DefaultBodyLimit,
        routing::post,
        Router,
    };
    use axum_test::TestServer;
    use sanctuary_core::models::ListQuery;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Note {
        title: String,
        secret: Option<String>,
    }

    impl Validate for Note {
        fn validate(&self) -> Result<(), Vec<FieldError>> {
            if self.title.is_empty() {
                Err(vec![FieldError::new("title", "is required")])
            } else {
                Ok(())
            }
        }

        fn raw_fields() -> &'static [&'static str] {
            &["secret"]
        }
    }

    async fn extract(body: &'static str) -> Result<Note, AppError> {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        ValidatedJson::<Note>::from_request(req, &()).await.map(|v| v.0)
    }

    #[tokio::test]
    async fn test_malformed_json() {
        assert!(matches!(
            extract("{\"title\": ").await,
            Err(AppError::MalformedBody)
        ));
        assert!(matches!(extract("").await, Err(AppError::MalformedBody)));
    }

    #[tokio::test]
    async fn test_strings_are_sanitized_before_validation() {
        let note = extract(r#"{"title": "  <script>x()</script>Hello "}"#)
            .await
            .unwrap();
        assert_eq!(note.title, "Hello");

        // Nothing left once the markup is gone.
        let result = extract(r#"{"title": "<script>x()</script>"}"#).await;
        match result {
            Err(AppError::InvalidInput(details)) => assert_eq!(details[0].field, "title"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_raw_fields_are_left_alone() {
        let note = extract(r#"{"title": "t", "secret": " p<script>w</script>d "}"#)
            .await
            .unwrap();
        assert_eq!(note.secret.as_deref(), Some(" p<script>w</script>d "));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_invalid_input() {
        match extract(r#"{"title": 5}"#).await {
            Err(AppError::InvalidInput(details)) => assert_eq!(details[0].field, "body"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    async fn extract_query(uri: &str) -> Result<ListQuery, AppError> {
        let (mut parts, _) = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        ValidatedQuery::<ListQuery>::from_request_parts(&mut parts, &())
            .await
            .map(|v| v.0)
    }

    #[tokio::test]
    async fn test_query_paging_is_parsed() {
        let query = extract_query("/?limit=5&offset=10").await.unwrap();
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.offset, Some(10));

        let query = extract_query("/").await.unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.offset, None);
    }

    #[tokio::test]
    async fn test_bad_query_is_invalid_input() {
        for uri in ["/?limit=abc", "/?offset=-1"] {
            match extract_query(uri).await {
                Err(AppError::InvalidInput(details)) => {
                    assert_eq!(details.len(), 1);
                    assert_eq!(details[0].field, "query", "uri: {uri}");
                }
                other => panic!("expected invalid input for {uri}, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let app = Router::new()
            .route(
                "/",
                post(|ValidatedJson(note): ValidatedJson<Note>| async move { note.title }),
            )
            .layer(DefaultBodyLimit::max(32));
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/")
            .json(&serde_json::json!({ "title": "Harvest festival".repeat(8) }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        response.assert_json(&serde_json::json!({ "error": "Payload too large" }));

        let response = server
            .post("/")
            .json(&serde_json::json!({ "title": "Choir" }))
            .await;
        response.assert_status_ok();
        response.assert_text("Choir");
    }
}
