pub mod auth_core;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod rate_limiting;
pub mod router;

#[cfg(test)]
pub mod test_utils;
