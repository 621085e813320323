pub mod api_server;
pub mod database;
pub mod rate_limiting;
pub mod session;
