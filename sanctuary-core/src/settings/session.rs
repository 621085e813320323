use serde::Deserialize;

use crate::utils::secret::MaskedSecret;

pub const DEFAULT_COOKIE_NAME: &str = "session";
pub const MIN_SECRET_LENGTH: usize = 32;

/// Signing and cookie parameters for session tokens
#[derive(Debug, Deserialize, Clone)]
#[readonly::make]
pub struct SessionSettings {
    pub secret: MaskedSecret,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Adds the `Secure` attribute, enable when served over https
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_ttl_seconds() -> u64 {
    7 * 24 * 60 * 60
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

impl SessionSettings {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: MaskedSecret::from_str(secret),
            ttl_seconds: default_ttl_seconds(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }

    pub fn has_weak_secret(&self) -> bool {
        self.secret.expose_secret().len() < MIN_SECRET_LENGTH
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub name: String,
    pub password: MaskedSecret,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Created on startup when no user exists yet
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

fn default_bcrypt_cost() -> u32 {
    12
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            bootstrap_admin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_secret_detection() {
        assert!(SessionSettings::new("short").has_weak_secret());
        assert!(!SessionSettings::new(&"x".repeat(MIN_SECRET_LENGTH)).has_weak_secret());
    }

    #[test]
    fn test_secret_is_masked_in_debug_output() {
        let settings = SessionSettings::new("a-very-long-signing-secret-for-tests");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("signing-secret"));
    }
}
