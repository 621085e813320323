//! Role gate shared by every protected endpoint.
//!
//! Endpoints declare the set of roles they accept; the gate only answers
//! yes or no. Public endpoints never consult it.

use super::principal::{Role, SessionPrincipal};

/// Administrators only
pub const ADMIN: &[Role] = &[Role::Admin];

/// Administrators and ministry leaders
pub const LEADERSHIP: &[Role] = &[Role::Admin, Role::Leader];

/// Any signed-in user
pub const CONGREGATION: &[Role] = &[Role::Admin, Role::Leader, Role::Member];

/// Allow iff a principal is present and its role is one of `required_roles`.
///
/// Order of `required_roles` is irrelevant.
pub fn authorize(principal: Option<&SessionPrincipal>, required_roles: &[Role]) -> bool {
    match principal {
        None => false,
        Some(principal) => required_roles.contains(&principal.role),
    }
}
