use anyhow::{Context, Result};
use mongodb::{Client, Database, options::ClientOptions};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::system::config::{AppConfig, DatabaseConfig};

pub type DatabaseHandle = Arc<Database>;
pub type DatabaseManager = Arc<RwLock<DatabaseService>>;

#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub database_name: String,
    pub database: DatabaseHandle,
}

#[derive(Default)]
pub struct DatabaseService {
    connections: HashMap<String, ConnectionInfo>,
    default_connection: Option<String>,
}

impl DatabaseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn initialize(config: &AppConfig) -> Result<DatabaseManager> {
        let mut service = DatabaseService::new();

        for (index, db_config) in config.databases.iter().enumerate() {
            let connection_name = if index == 0 {
                "default".to_string()
            } else {
                format!("db{}", index)
            };

            let connection_info = Self::create_connection(db_config, &connection_name).await?;

            info!(
                connection = %connection_name,
                database = %db_config.database,
                "connected to database"
            );

            if index == 0 {
                service.default_connection = Some(connection_name.clone());
            }

            service.connections.insert(connection_name, connection_info);
        }

        if service.connections.is_empty() {
            return Err(anyhow::anyhow!("No database connections configured"));
        }

        info!(
            connections = ?service.list_connections(),
            "database manager initialized"
        );

        Ok(Arc::new(RwLock::new(service)))
    }

    pub fn connection_string(config: &DatabaseConfig) -> String {
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            format!(
                "mongodb://{}:{}@{}:{}/{}",
                username, password, config.host, config.port, config.database
            )
        } else {
            format!(
                "mongodb://{}:{}/{}",
                config.host, config.port, config.database
            )
        }
    }

    async fn create_connection(
        config: &DatabaseConfig,
        connection_name: &str,
    ) -> Result<ConnectionInfo> {
        let connection_string = Self::connection_string(config);
        let mut client_options = ClientOptions::parse(connection_string.as_str())
            .await
            .with_context(|| {
                format!("Failed to parse connection string for {}", connection_name)
            })?;

        client_options.max_pool_size = Some(config.max_connections);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout));
        client_options.server_selection_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout));

        let client = Client::with_options(client_options)
            .with_context(|| format!("Failed to create MongoDB client for {}", connection_name))?;

        let database = client.database(&config.database);

        // Test connection
        database
            .run_command(bson::doc! { "ping": 1 })
            .await
            .with_context(|| format!("Failed to ping database {}", connection_name))?;

        Ok(ConnectionInfo {
            database_name: config.database.clone(),
            database: Arc::new(database),
        })
    }

    pub fn get_database(&self, name: Option<&str>) -> Result<DatabaseHandle> {
        let connection_name = match name {
            Some(name) => name,
            None => self
                .default_connection
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("No default database connection"))?,
        };

        self.connections
            .get(connection_name)
            .map(|conn| conn.database.clone())
            .ok_or_else(|| anyhow::anyhow!("Database connection '{}' not found", connection_name))
    }

    pub fn list_connections(&self) -> Vec<String> {
        self.connections.keys().cloned().collect()
    }

    pub async fn health_check(&self) -> HashMap<String, bool> {
        let mut results = HashMap::new();

        for (name, conn) in &self.connections {
            let is_healthy = conn
                .database
                .run_command(bson::doc! { "ping": 1 })
                .await
                .is_ok();

            if !is_healthy {
                warn!(connection = %name, database = %conn.database_name, "database ping failed");
            }
            results.insert(name.clone(), is_healthy);
        }

        results
    }
}

// Helper functions for easy database access
pub async fn get_database(manager: &DatabaseManager, name: Option<&str>) -> Result<DatabaseHandle> {
    let service = manager.read().await;
    service.get_database(name)
}

pub async fn health_check(manager: &DatabaseManager) -> HashMap<String, bool> {
    let service = manager.read().await;
    service.health_check().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_config(username: Option<&str>, password: Option<&str>) -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 27017,
            database: "users".to_string(),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            connection_timeout: 5,
            max_connections: 10,
        }
    }

    #[test]
    fn test_connection_string() {
        assert_eq!(
            DatabaseService::connection_string(&db_config(None, None)),
            "mongodb://localhost:27017/users"
        );
        assert_eq!(
            DatabaseService::connection_string(&db_config(Some("app"), Some("pw"))),
            "mongodb://app:pw@localhost:27017/users"
        );
    }

    #[tokio::test]
    async fn test_initialize_without_databases_fails() {
        let result = DatabaseService::initialize(&AppConfig::default()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_service_has_no_default() {
        let service = DatabaseService::new();
        assert!(service.get_database(None).is_err());
        assert!(service.list_connections().is_empty());
    }
}
