use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    domains::user::{
        dto::{HealthResponse, LoginRequest, LoginResponse},
        handlers::auth_middleware::AuthenticatedUser,
        state::AuthState,
    },
    shared::{error::AppError, extract::JsonBody, models::User, utils::DateUtil},
    system::database,
};

// Register a new user
#[instrument(skip_all, fields(username = %user.username))]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    JsonBody(user): JsonBody<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if !user.has_credentials() {
        return Err(AppError::UsernamePasswordEmpty);
    }

    // Reject an existing username+password pair; only "not found" lets us through
    match state
        .users()
        .get_by_username_and_password(&user.username, &user.password)
        .await
    {
        Ok(_) => return Err(AppError::UserAlreadyExist),
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let created = state.users().create(user).await?;
    info!(user_id = %created.id, "user registered");

    Ok((StatusCode::CREATED, Json(created)))
}

// Login user and issue a session token.
// Any lookup failure, including unknown credentials, is reported as 500.
#[instrument(skip_all, fields(username = %payload.username))]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .users()
        .get_by_username_and_password(&payload.username, &payload.password)
        .await?;

    let access_key = state.session_service.issue(&user).await?;
    info!(user_id = %user.id, "login succeeded");

    Ok(Json(LoginResponse { access_key }))
}

// Get the profile of the user attached by the session middleware
pub async fn profile(
    State(state): State<Arc<AuthState>>,
    AuthenticatedUser { user_id }: AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let user = state.users().get(&user_id).await?;
    Ok(Json(user))
}

// Health check for the service and its user store
pub async fn health(State(state): State<Arc<AuthState>>) -> Json<HealthResponse> {
    let shared = &state.shared_state;

    let (status, user_store) = match &shared.db_manager {
        Some(manager) => {
            let checks = database::health_check(manager).await;
            let healthy = checks.values().all(|ok| *ok);
            if !healthy {
                warn!(?checks, "database health check failed");
            }
            (if healthy { "healthy" } else { "degraded" }, "mongodb")
        }
        None => ("healthy", "memory"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        service: "user-session-api".to_string(),
        environment: shared.config.environment.clone(),
        user_store: user_store.to_string(),
        timestamp: DateUtil::to_rfc3339(&DateUtil::now()),
    })
}
