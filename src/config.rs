use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Log every SQL statement sent to the store.
    pub db_echo: bool,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://diary.db".into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 8080,
        };
        let db_echo = std::env::var("DB_ECHO")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);
        Ok(Self {
            database_url,
            host,
            port,
            db_echo,
            db_max_connections,
        })
    }

    /// Private in-memory database; every pool built from this config sees its own data.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_echo: false,
            db_max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_is_detected() {
        let cfg = AppConfig::in_memory();
        assert!(cfg.is_in_memory());
        assert_eq!(cfg.db_max_connections, 1);
    }

    #[test]
    fn file_url_is_not_in_memory() {
        let cfg = AppConfig {
            database_url: "sqlite://diary.db".into(),
            ..AppConfig::in_memory()
        };
        assert!(!cfg.is_in_memory());
    }
}
