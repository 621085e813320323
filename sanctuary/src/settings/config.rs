use config::{Config, ConfigError, Environment, File};
use sanctuary_core::settings::{
    api_server::ApiServer,
    database::DatabaseSettings,
    rate_limiting::RateLimitingConfig,
    session::{AuthSettings, SessionSettings},
};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct Settings {
    pub debug: bool,
    pub api: ApiServer,
    pub session: SessionSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("SANCTUARY")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn new() -> Result<Self, ConfigError> {
        // A .env file is optional; real environment variables win.
        let _ = dotenvy::dotenv();

        let run_mode = env::var("SANCTUARY_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("debug", false)?
            .set_default("api.bind_address", "0.0.0.0:8787")?
            .set_default("api.max_body_size", "1M")?
            .set_default("database.url", "sqlite://sanctuary.db?mode=rwc")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment());

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.expose_secret().is_empty() {
            return Err(ConfigError::Message(
                "session.secret must be set (SANCTUARY__SESSION__SECRET)".into(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "auth.bcrypt_cost ({}) must be between 4 and 31",
                self.auth.bcrypt_cost
            )));
        }
        self.rate_limiting
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(())
    }

    /// Settings with an in-memory database, cheap password hashing and the
    /// stock rate limit tiers.
    pub fn for_tests() -> Self {
        Settings {
            debug: true,
            api: ApiServer::default(),
            session: SessionSettings::new("test-signing-secret-that-is-long-enough"),
            auth: AuthSettings {
                bcrypt_cost: 4,
                bootstrap_admin: None,
            },
            rate_limiting: RateLimitingConfig::default(),
            database: DatabaseSettings::in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanctuary_core::settings::rate_limiting::RateLimitConfig;

    fn load(path: &str) -> Settings {
        Config::builder()
            .add_source(File::with_name(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_load_settings_from_file() {
        let settings = load("tests/test_settings.yaml");

        assert_eq!(settings.api.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.api.max_body_size, 64 * 1024);
        assert_eq!(settings.session.cookie_name, "sanctuary_session");
        assert_eq!(settings.session.ttl_seconds, 3600);
        assert_eq!(settings.auth.bcrypt_cost, 4);
        assert!(settings.database.is_in_memory());

        let admin = settings.auth.bootstrap_admin.as_ref().unwrap();
        assert_eq!(admin.email, "admin@example.org");
        assert_eq!(admin.password.expose_secret(), "change-me-please");

        assert_eq!(settings.rate_limiting.strict.max_requests, 3);
        assert_eq!(
            settings.rate_limiting.auth_strict,
            RateLimitConfig::AUTH_STRICT
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_session_secret_from_env() {
        env::set_var("SANCTUARY__SESSION__SECRET", "secret-from-the-environment-0123456789");

        let settings: Settings = Config::builder()
            .add_source(File::with_name("tests/test_settings.yaml"))
            .add_source(Settings::get_environment())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        env::remove_var("SANCTUARY__SESSION__SECRET");

        assert_eq!(
            settings.session.secret.expose_secret(),
            "secret-from-the-environment-0123456789"
        );
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let mut settings = Settings::for_tests();
        settings.session = SessionSettings::new("");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut settings = Settings::for_tests();
        settings.auth.bcrypt_cost = 2;
        assert!(settings.validate().is_err());
        settings.auth.bcrypt_cost = 10;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_rate_limit_tier_is_rejected() {
        let mut settings = Settings::for_tests();
        settings.rate_limiting.default = RateLimitConfig {
            window_ms: 0,
            max_requests: 100,
        };
        assert!(settings.validate().is_err());
    }
}
