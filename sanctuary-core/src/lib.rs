pub mod auth;
pub mod models;
pub mod settings;
pub mod utils;
pub mod validation;
