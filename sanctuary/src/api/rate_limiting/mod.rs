//! Fixed-window rate limiting for API endpoints
//!
//! Every route class has its own tier:
//! - Public endpoints use the `default` tier
//! - Authenticated admin endpoints use the `strict` tier
//! - Credential endpoints (login) use the `auth_strict` tier
//!
//! Counters live in one process-wide [`store::RateLimitStore`] keyed by
//! `"{tier}:{identifier}"`, so tiers never share a budget. Counters are not
//! shared between processes and are lost on restart.

pub mod extractors;
pub mod middleware;
pub mod store;

pub use middleware::RateLimitLayer;
pub use store::{RateLimitDecision, RateLimitStore};

pub mod headers {
    use axum::http::HeaderName;

    pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}
