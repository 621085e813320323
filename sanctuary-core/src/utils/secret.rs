//! Secrets loaded from configuration (session signing key, bootstrap password).
//!
//! Values live in a `secrecy::SecretString`, print partially masked in Debug
//! and Display output, and need an explicit `expose_secret()` to be read.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

#[derive(Clone)]
pub struct MaskedSecret(SecretString);

impl MaskedSecret {
    pub fn new(value: String) -> Self {
        Self(SecretString::new(value.into_boxed_str()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self::new(s.to_string())
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", mask_value(self.0.expose_secret()))
    }
}

impl std::fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", mask_value(self.0.expose_secret()))
    }
}

impl<'de> Deserialize<'de> for MaskedSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(MaskedSecret::new(value))
    }
}

/// Mask all but the tail of a value.
///
/// Values shorter than 12 characters keep their last 2 characters, longer
/// ones keep 4.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    let visible = if len >= 12 { 4 } else { 2.min(len) };
    let hidden = len - visible;

    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_value() {
        assert_eq!(mask_value("abcdefghijklmnop"), "************mnop");
        assert_eq!(mask_value("secret"), "****et");
        assert_eq!(mask_value("a"), "a");
        assert_eq!(mask_value(""), "");
    }

    #[test]
    fn test_debug_and_display_are_masked() {
        let secret = MaskedSecret::from_str("correct-horse-battery-staple");
        assert_eq!(format!("{}", secret), "************************aple");
        assert!(!format!("{:?}", secret).contains("horse"));
        assert_eq!(secret.expose_secret(), "correct-horse-battery-staple");
    }

    #[test]
    fn test_deserialize() {
        let secret: MaskedSecret = serde_json::from_str("\"from-config\"").unwrap();
        assert_eq!(secret.expose_secret(), "from-config");
    }
}
