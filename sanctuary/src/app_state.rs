use std::sync::Arc;

use sanctuary_core::auth::Role;
use tracing::{info, warn};

use crate::api::auth_core::{hash_password, SessionKeys};
use crate::api::rate_limiting::RateLimitStore;
use crate::db::{self, Database};
use crate::settings::config::Settings;
use crate::stop_flag;

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stop_flag: stop_flag::StopFlag,
    pub db: Database,
    pub rate_limits: RateLimitStore,
    pub sessions: SessionKeys,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<SharedAppState> {
        let stop_flag = stop_flag::StopFlag::new();
        stop_flag::register_signal_handler(&stop_flag);

        let state = Self::with_settings(settings, stop_flag).await?;
        state.ensure_bootstrap_admin().await?;
        Ok(Arc::new(state))
    }

    pub async fn with_settings(
        settings: Settings,
        stop_flag: stop_flag::StopFlag,
    ) -> anyhow::Result<Self> {
        let db = Database::connect(&settings.database).await?;

        if settings.session.has_weak_secret() {
            warn!("session.secret is shorter than 32 bytes, consider a longer signing key");
        }
        if !settings.rate_limiting.enabled {
            warn!("Rate limiting is disabled");
        }

        Ok(AppState {
            rate_limits: RateLimitStore::new(settings.rate_limiting.sweep_probability),
            sessions: SessionKeys::new(&settings.session),
            db,
            stop_flag,
            settings,
        })
    }

    /// Creates the configured admin account when no user exists yet.
    pub async fn ensure_bootstrap_admin(&self) -> anyhow::Result<()> {
        let Some(admin) = &self.settings.auth.bootstrap_admin else {
            return Ok(());
        };

        if db::users::count(self.db.pool()).await? > 0 {
            return Ok(());
        }

        let hash = hash_password(
            admin.password.expose_secret().to_string(),
            self.settings.auth.bcrypt_cost,
        )
        .await?;

        db::users::insert(
            self.db.pool(),
            &admin.email,
            &admin.name,
            Role::Admin,
            &hash,
        )
        .await?;

        info!("Created bootstrap admin {}", admin.email);
        Ok(())
    }
}
