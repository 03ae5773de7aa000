pub mod auth_handlers;
pub mod auth_middleware;
pub mod fixture_handlers;

pub use auth_handlers::{health, login, profile, register};
pub use auth_middleware::session_auth_middleware;
pub use fixture_handlers::{test_endpoint, test_endpoint_with_param, test_post_endpoint};
