//! SQLite-backed store.
//!
//! Every repository function is a single prepared statement; there are no
//! multi-statement transactions.

pub mod dashboard;
pub mod donations;
pub mod events;
pub mod live_streams;
pub mod members;
pub mod ministries;
pub mod pastoral_visits;
pub mod users;
pub mod visitors;

use std::str::FromStr;

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use sanctuary_core::settings::database::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)
            .with_context(|| format!("Invalid database url '{}'", settings.url))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is a separate database, so keep
        // exactly one alive for the lifetime of the pool.
        let pool_options = if settings.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to open database")?;

        let database = Self { pool };
        database.migrate().await?;
        info!("Database ready");
        Ok(database)
    }

    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect(&DatabaseSettings::in_memory()).await
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        for statement in SCHEMA
            .split(';')
            .map(str::trim)
            .filter(|statement| !statement.is_empty())
        {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to apply schema")?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
