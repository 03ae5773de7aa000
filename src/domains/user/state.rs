use std::sync::Arc;
use crate::shared::state::SharedState;
use crate::domains::user::services::SessionService;
use crate::system::store::UserStore;

/// Auth-specific state containing the session service
/// This state is specific to the user domain
pub struct AuthState {
    pub shared_state: Arc<SharedState>,
    pub session_service: SessionService,
}

impl AuthState {
    pub fn new(shared_state: Arc<SharedState>) -> Self {
        let session_service = SessionService::new(Arc::clone(&shared_state.session_cache));
        Self {
            shared_state,
            session_service,
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.shared_state.user_store.as_ref()
    }
}
