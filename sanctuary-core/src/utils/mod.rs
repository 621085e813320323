pub mod sanitize;
pub mod secret;
