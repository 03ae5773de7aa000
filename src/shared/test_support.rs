//! Test doubles and state builders shared by handler and service tests.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::domains::user::state::AuthState;
use crate::shared::models::User;
use crate::shared::state::SharedState;
use crate::system::cache::{CacheError, InMemorySessionCache, SessionCache};
use crate::system::config::AppConfig;
use crate::system::store::{InMemoryUserStore, StoreError, UserStore};

pub const CACHE_FAILURE: &str = "Cache error: connection refused";
pub const STORE_FAILURE: &str = "Database error: connection reset";

/// Cache whose every call fails as if the backend were unreachable.
pub struct FailingCache;

#[async_trait]
impl SessionCache for FailingCache {
    async fn set_value(&self, _: &str, _: Value, _: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }

    async fn get_value(&self, _: &str) -> Result<Option<Value>, CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }
}

/// User store that fails with a database error.
///
/// With `lookup_not_found` set, credential lookups report "not found" so a
/// register request gets as far as `create`, which still fails.
#[derive(Default)]
pub struct FailingUserStore {
    pub lookup_not_found: bool,
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn get(&self, _: &str) -> Result<User, StoreError> {
        Err(StoreError::Database("connection reset".to_string()))
    }

    async fn get_by_username_and_password(&self, _: &str, _: &str) -> Result<User, StoreError> {
        if self.lookup_not_found {
            Err(StoreError::NotFound)
        } else {
            Err(StoreError::Database("connection reset".to_string()))
        }
    }

    async fn create(&self, _: User) -> Result<User, StoreError> {
        Err(StoreError::Database("connection reset".to_string()))
    }
}

pub fn auth_state_with(
    user_store: Arc<dyn UserStore>,
    session_cache: Arc<dyn SessionCache>,
) -> Arc<AuthState> {
    let shared_state = Arc::new(SharedState {
        config: Arc::new(AppConfig::default()),
        user_store,
        session_cache,
        db_manager: None,
    });

    Arc::new(AuthState::new(shared_state))
}

pub fn create_test_auth_state() -> Arc<AuthState> {
    auth_state_with(
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemorySessionCache::new()),
    )
}
