use std::sync::Arc;
use crate::system::cache::SessionCache;
use crate::system::config::AppConfig;
use crate::system::database::DatabaseManager;
use crate::system::store::UserStore;

/// Global shared state containing system-level dependencies
/// This state is shared across all domains and contains core infrastructure
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<AppConfig>,
    pub user_store: Arc<dyn UserStore>,
    pub session_cache: Arc<dyn SessionCache>,
    /// Present only when a MongoDB connection backs the user store
    pub db_manager: Option<DatabaseManager>,
}
