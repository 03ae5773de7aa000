use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connection_timeout: u64,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How often expired sessions are swept from the in-memory cache
    pub purge_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    #[serde(default)]
    pub databases: Vec<DatabaseConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub environment: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            purge_interval_seconds: 60,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
                workers: 4,
            },
            log: LogConfig {
                level: "info".to_string(),
                file_path: None,
            },
            databases: vec![],
            cache: CacheConfig::default(),
            environment: "default".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from("configs")
    }

    // Defaults, then the environment's JSON file, then environment variables
    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_dir = config_dir.as_ref();
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "default".to_string());

        let env_file = config_dir.join(format!("config.{}.json", environment));
        let default_file = config_dir.join("config.default.json");

        let mut config = if env_file.exists() {
            Self::from_file(&env_file)?
        } else if default_file.exists() {
            Self::from_file(&default_file)?
        } else {
            AppConfig::default()
        };

        // Ensure environment field matches actual environment
        config.environment = environment;
        config.load_from_env();

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn load_from_env(&mut self) {
        // Server config
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env("SERVER_PORT") {
            self.server.port = port;
        }
        if let Some(workers) = parse_env("SERVER_WORKERS") {
            self.server.workers = workers;
        }

        // Log config
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.log.level = level;
        }
        if let Ok(file_path) = env::var("LOG_FILE_PATH") {
            self.log.file_path = Some(file_path);
        }

        if let Some(interval) = parse_env("CACHE_PURGE_INTERVAL") {
            self.cache.purge_interval_seconds = interval;
        }

        // A DB_HOST variable replaces the primary database entry
        if let Ok(host) = env::var("DB_HOST") {
            let db_config = DatabaseConfig {
                host,
                port: parse_env("DB_PORT").unwrap_or(27017),
                database: env::var("DB_DATABASE").unwrap_or_else(|_| "users".to_string()),
                username: env::var("DB_USERNAME").ok(),
                password: env::var("DB_PASSWORD").ok(),
                connection_timeout: parse_env("DB_CONNECTION_TIMEOUT").unwrap_or(10),
                max_connections: parse_env("DB_MAX_CONNECTIONS").unwrap_or(10),
            };

            if self.databases.is_empty() {
                self.databases.push(db_config);
            } else {
                self.databases[0] = db_config;
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3001");
        assert!(config.databases.is_empty());
        assert_eq!(config.cache.purge_interval_seconds, 60);
    }

    #[test]
    fn test_load_from_missing_dir_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config.server.port, AppConfig::default().server.port);
    }

    #[test]
    fn test_load_from_default_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.default.json"),
            r#"{
                "server": {"host": "0.0.0.0", "port": 8088, "workers": 2},
                "log": {"level": "debug", "file_path": null},
                "cache": {"purge_interval_seconds": 15}
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(temp_dir.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.cache.purge_interval_seconds, 15);
        assert!(config.databases.is_empty());
    }
}
