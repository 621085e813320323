//! sanctuary library
//!
//! The server binary is a thin wrapper around this crate; the router and
//! state are public so integration tests can drive the full guard chain.

pub mod api;
pub mod app_state;
pub mod db;
pub mod http;
pub mod init_telemetry;
pub mod settings;
pub mod stop_flag;

pub use app_state::AppState;
