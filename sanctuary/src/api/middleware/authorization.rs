use std::future::Future;
use std::pin::Pin;

use axum::{extract::Request, middleware::Next, response::Response};
use sanctuary_core::auth::{authorize, Role, SessionPrincipal};
use tracing::warn;

use crate::api::error::AppError;

/// Middleware factory gating a route on the caller's role.
///
/// Must sit inside [`require_session`](super::require_session); without a
/// principal in the request extensions every request is denied.
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let principal = req.extensions().get::<SessionPrincipal>();

            if authorize(principal, roles) {
                return Ok(next.run(req).await);
            }

            match principal {
                Some(principal) => {
                    warn!(
                        "Role {} not allowed for {} {} (requires one of {:?})",
                        principal.role,
                        req.method(),
                        req.uri().path(),
                        roles
                    );
                    Err(AppError::Unauthorized(principal.role))
                }
                None => {
                    warn!(
                        "No session principal for {} {}",
                        req.method(),
                        req.uri().path()
                    );
                    Err(AppError::Unauthenticated)
                }
            }
        })
    }
}
