//! Session tokens: issuing, reading and verifying.
//!
//! Tokens are HS256 JWTs carried in the session cookie or, for API clients,
//! in an `Authorization: Bearer` header.

use axum::http::{header, HeaderMap};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sanctuary_core::auth::{Role, SessionPrincipal};
use sanctuary_core::settings::session::SessionSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl From<SessionClaims> for SessionPrincipal {
    fn from(claims: SessionClaims) -> Self {
        SessionPrincipal {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
    cookie_name: String,
    secure_cookie: bool,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("cookie_name", &self.cookie_name)
            .field("secure_cookie", &self.secure_cookie)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(settings: &SessionSettings) -> Self {
        let secret = settings.secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds: i64::try_from(settings.ttl_seconds).unwrap_or(i64::MAX),
            cookie_name: settings.cookie_name.clone(),
            secure_cookie: settings.secure_cookie,
        }
    }

    pub fn issue(&self, principal: &SessionPrincipal) -> Result<String, AppError> {
        let iat = Utc::now().timestamp();
        self.issue_with_times(principal, iat, iat.saturating_add(self.ttl_seconds))
    }

    fn issue_with_times(
        &self,
        principal: &SessionPrincipal,
        iat: i64,
        exp: i64,
    ) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: principal.user_id.clone(),
            email: principal.email.clone(),
            role: principal.role,
            iat,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign session: {e}")))
    }

    /// Absent, malformed, forged and expired tokens all come back as `None`.
    pub fn verify(&self, token: Option<&str>) -> Option<SessionPrincipal> {
        let token = token?;
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims.into()),
            Err(e) => {
                debug!("Session token rejected: {}", e);
                None
            }
        }
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl_seconds)
    }

    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name, value, max_age
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Session cookie first, then a bearer token.
    pub fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        cookie_value(headers, &self.cookie_name).or_else(|| bearer_token(headers))
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {e}")))
}

/// False on mismatch and on unreadable hashes.
pub async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> SessionKeys {
        SessionKeys::new(&SessionSettings::new("unit-test-signing-secret-0123456789"))
    }

    fn principal() -> SessionPrincipal {
        SessionPrincipal {
            user_id: "user-42".to_string(),
            email: "leader@example.org".to_string(),
            role: Role::Leader,
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let keys = keys();
        let token = keys.issue(&principal()).unwrap();
        assert_eq!(keys.verify(Some(&token)), Some(principal()));
    }

    #[test]
    fn test_missing_token_is_anonymous() {
        assert_eq!(keys().verify(None), None);
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        assert_eq!(keys().verify(Some("not-a-jwt")), None);
        assert_eq!(keys().verify(Some("")), None);
        assert_eq!(keys().verify(Some("a.b.c")), None);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = SessionKeys::new(&SessionSettings::new("a-completely-different-secret-987654"));
        let token = other.issue(&principal()).unwrap();
        assert_eq!(keys().verify(Some(&token)), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();
        let token = keys
            .issue_with_times(&principal(), now - 7200, now - 3600)
            .unwrap();
        assert_eq!(keys.verify(Some(&token)), None);
    }

    #[test]
    fn test_cookie_is_preferred_over_bearer() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=cookie-token"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(keys.extract_token(&headers), Some("cookie-token"));

        headers.remove(header::COOKIE);
        assert_eq!(keys.extract_token(&headers), Some("header-token"));

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(keys.extract_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = keys().session_cookie("abc");
        assert!(cookie.starts_with("session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));

        assert!(keys().clear_cookie().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse".to_string(), 4).await.unwrap();
        assert!(verify_password("correct horse".to_string(), hash.clone()).await);
        assert!(!verify_password("wrong horse".to_string(), hash).await);
        assert!(!verify_password("any".to_string(), "not-a-hash".to_string()).await);
    }
}
