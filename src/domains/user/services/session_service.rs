use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::shared::error::AppError;
use crate::shared::models::User;
use crate::system::cache::{CacheError, SessionCache};

/// Lifetime of an issued session token.
pub const SESSION_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("Session serialization failed: {0}")]
    Serialization(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Issues opaque session tokens and redeems them for the cached user.
#[derive(Clone)]
pub struct SessionService {
    cache: Arc<dyn SessionCache>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(cache: Arc<dyn SessionCache>) -> Self {
        Self {
            cache,
            ttl: SESSION_TTL,
        }
    }

    // Mint a fresh token and cache token -> user for the session lifetime
    pub async fn issue(&self, user: &User) -> Result<String, SessionError> {
        let token = Uuid::new_v4().to_string();
        let value = serde_json::to_value(user)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        self.cache.set_value(&token, value, self.ttl).await?;
        debug!(user_id = %user.id, "issued session token");

        Ok(token)
    }

    // Look up the user behind a token; unknown or expired tokens yield None
    pub async fn resolve(&self, token: &str) -> Result<Option<User>, SessionError> {
        match self.cache.get_value(token).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| SessionError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }
}
