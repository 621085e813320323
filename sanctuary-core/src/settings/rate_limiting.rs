use serde::Deserialize;
use thiserror::Error;

/// Rate limiting configuration validation error
#[derive(Debug, Error)]
#[error("Rate limiting configuration error: {message}")]
pub struct RateLimitingValidationError {
    pub message: String,
}

/// A fixed window: at most `max_requests` per identifier every `window_ms`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
}

impl RateLimitConfig {
    /// 100 requests per 15 minutes, used for public pages
    pub const DEFAULT: RateLimitConfig = RateLimitConfig {
        window_ms: 15 * 60 * 1000,
        max_requests: 100,
    };

    /// 10 requests per minute, used for authenticated API routes
    pub const STRICT: RateLimitConfig = RateLimitConfig {
        window_ms: 60 * 1000,
        max_requests: 10,
    };

    /// 5 requests per minute, used for login
    pub const AUTH_STRICT: RateLimitConfig = RateLimitConfig {
        window_ms: 60 * 1000,
        max_requests: 5,
    };

    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if self.window_ms == 0 {
            return Err(RateLimitingValidationError {
                message: "window_ms must be greater than 0".to_string(),
            });
        }

        if self.max_requests == 0 {
            return Err(RateLimitingValidationError {
                message: "max_requests must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Endpoint classes with independent limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitTier {
    Default,
    Strict,
    AuthStrict,
}

impl RateLimitTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitTier::Default => "default",
            RateLimitTier::Strict => "strict",
            RateLimitTier::AuthStrict => "auth_strict",
        }
    }
}

/// Rate limiting configuration for the API
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingConfig {
    /// Global enable/disable switch for all rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Chance that a single check also evicts expired windows
    #[serde(default = "default_sweep_probability")]
    pub sweep_probability: f64,

    /// Public pages and forms
    #[serde(default)]
    pub default: RateLimitConfig,

    /// Authenticated API routes
    #[serde(default = "default_strict")]
    pub strict: RateLimitConfig,

    /// Login and other credential endpoints
    #[serde(default = "default_auth_strict")]
    pub auth_strict: RateLimitConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_sweep_probability() -> f64 {
    0.01
}

fn default_strict() -> RateLimitConfig {
    RateLimitConfig::STRICT
}

fn default_auth_strict() -> RateLimitConfig {
    RateLimitConfig::AUTH_STRICT
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sweep_probability: default_sweep_probability(),
            default: RateLimitConfig::DEFAULT,
            strict: RateLimitConfig::STRICT,
            auth_strict: RateLimitConfig::AUTH_STRICT,
        }
    }
}

impl RateLimitingConfig {
    pub fn tier(&self, tier: RateLimitTier) -> RateLimitConfig {
        match tier {
            RateLimitTier::Default => self.default,
            RateLimitTier::Strict => self.strict,
            RateLimitTier::AuthStrict => self.auth_strict,
        }
    }

    /// Validate the rate limiting configuration
    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if !self.enabled {
            return Ok(());
        }

        if !(0.0..=1.0).contains(&self.sweep_probability) {
            return Err(RateLimitingValidationError {
                message: format!(
                    "sweep_probability ({}) must be between 0 and 1",
                    self.sweep_probability
                ),
            });
        }

        for tier in [
            RateLimitTier::Default,
            RateLimitTier::Strict,
            RateLimitTier::AuthStrict,
        ] {
            self.tier(tier)
                .validate()
                .map_err(|e| RateLimitingValidationError {
                    message: format!("{}: {}", tier.as_str(), e.message),
                })?;
        }

        Ok(())
    }
}
