use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

/// Verifies the session token and stores the caller's
/// [`SessionPrincipal`](sanctuary_core::auth::SessionPrincipal) in the
/// request extensions.
///
/// A missing token and a token that fails verification get the same 401.
pub async fn require_session(
    State(state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = state.sessions.extract_token(req.headers());
    let token_present = token.is_some();

    match state.sessions.verify(token) {
        Some(principal) => {
            debug!(
                user_id = %principal.user_id,
                role = principal.role.as_str(),
                "Session verified"
            );
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        None => {
            warn!(
                "Unauthenticated request | {} {} | token present: {}",
                req.method(),
                req.uri().path(),
                token_present
            );
            Err(AppError::Unauthenticated)
        }
    }
}
