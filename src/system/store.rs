use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::models::User;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Persistence contract for user records.
///
/// Implementations own their concurrency; handlers share one instance
/// behind an `Arc`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id, `StoreError::NotFound` when absent.
    async fn get(&self, id: &str) -> Result<User, StoreError>;

    /// Fetch the user holding exactly this username and password.
    async fn get_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError>;

    /// Persist a new user. The store assigns the id and returns the stored record.
    async fn create(&self, user: User) -> Result<User, StoreError>;
}

// Process-local store used when no database is configured, and in tests
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.matches_credentials(username, password))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, mut user: User) -> Result<User, StoreError> {
        user.id = Uuid::new_v4().to_string();
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
