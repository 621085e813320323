use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[readonly::make]
pub struct DatabaseSettings {
    /// sqlx connection url, e.g. `sqlite://data/sanctuary.db?mode=rwc`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseSettings {
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://sanctuary.db?mode=rwc".to_string(),
            max_connections: default_max_connections(),
        }
    }
}
