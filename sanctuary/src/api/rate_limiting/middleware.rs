//! Tower layer that runs the rate limit check before anything else.

use axum::http::{HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use sanctuary_core::settings::rate_limiting::{
    RateLimitConfig, RateLimitTier, RateLimitingConfig,
};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

use super::extractors::resolve_identifier;
use super::headers::{RATELIMIT_LIMIT, RATELIMIT_REMAINING, RATELIMIT_RESET};
use super::store::{now_millis, RateLimitDecision, RateLimitStore};
use crate::api::error::AppError;

#[derive(Clone)]
pub struct RateLimitLayer {
    store: RateLimitStore,
    tier: RateLimitTier,
    config: RateLimitConfig,
    enabled: bool,
}

impl RateLimitLayer {
    pub fn new(store: RateLimitStore, tier: RateLimitTier, settings: &RateLimitingConfig) -> Self {
        Self {
            store,
            tier,
            config: settings.tier(tier),
            enabled: settings.enabled,
        }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            store: self.store.clone(),
            tier: self.tier,
            config: self.config,
            enabled: self.enabled,
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    store: RateLimitStore,
    tier: RateLimitTier,
    config: RateLimitConfig,
    enabled: bool,
}

fn apply_headers(response: &mut Response, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(decision.reset_at_secs()));
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimitService<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if !self.enabled {
            return Box::pin(self.inner.call(req));
        }

        let identifier = resolve_identifier(req.headers());
        let key = format!("{}:{}", self.tier.as_str(), identifier);
        let now = now_millis();
        let decision = self.store.check_at(&key, &self.config, now);

        if !decision.allowed {
            warn!(
                identifier = %identifier,
                tier = self.tier.as_str(),
                path = %req.uri().path(),
                "Rate limit exceeded"
            );
            let response = AppError::RateLimited {
                limit: decision.limit,
                reset_at_secs: decision.reset_at_secs(),
                retry_after: decision.retry_after_secs(now),
            }
            .into_response();
            return Box::pin(async move { Ok(response) });
        }

        // Take the service that was driven to readiness, leave a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            apply_headers(&mut response, &decision);
            Ok(response)
        })
    }
}
