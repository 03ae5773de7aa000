use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::sync::Arc;
use tracing::debug;

use crate::{domains::user::state::AuthState, shared::error::AppError};

/// Identity of the caller, placed on the request by [`session_auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Internal("No authenticated user on request".to_string()))
    }
}

// Extract the session token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

// Redeem the bearer session token and attach the caller's identity
pub async fn session_auth_middleware(
    State(state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".to_string()))?;

    let user = state
        .session_service
        .resolve(&token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session is invalid or expired".to_string()))?;

    debug!(user_id = %user.id, "session resolved");
    request.extensions_mut().insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(request).await)
}
