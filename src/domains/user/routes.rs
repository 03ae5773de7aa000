use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domains::user::{
    handlers::{
        health, login, profile, register, session_auth_middleware, test_endpoint,
        test_endpoint_with_param, test_post_endpoint,
    },
    state::AuthState,
};

// Build the application router. `/profile` sits behind the session middleware.
pub fn router(auth_state: Arc<AuthState>) -> Router {
    let authenticated = Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&auth_state),
            session_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        // Fixture endpoints
        .route("/test", get(test_endpoint).post(test_post_endpoint))
        .route("/test/{id}", get(test_endpoint_with_param))
        // Auth endpoints
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(authenticated)
        .with_state(auth_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
