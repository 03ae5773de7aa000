//! Smoke-test endpoints returning canned users. They touch neither the
//! user store nor the session cache.

use axum::{
    extract::{Json, Path},
    http::StatusCode,
};

use crate::shared::{error::AppError, extract::JsonBody, models::User};

pub const ECHO_USER_ID: &str = "3333";

fn fixture_user() -> User {
    User::new("100513974", "TestUsername1", "Qwerty11!", "Dana", "White", "picture1")
}

fn fixture_user_by_id(id: &str) -> Option<User> {
    match id {
        "1" => Some(User::new("1", "Cool_Dude", "qweasdzxc", "Alex", "Hopkins", "picture2")),
        "2" => Some(User::new("2", "FeelsBadMan", "rtyfghvbn", "Jack", "Smith", "picture3")),
        _ => None,
    }
}

pub async fn test_endpoint() -> Json<User> {
    Json(fixture_user())
}

pub async fn test_endpoint_with_param(Path(id): Path<String>) -> Result<Json<User>, AppError> {
    fixture_user_by_id(&id)
        .map(Json)
        .ok_or_else(|| AppError::BadRequest("Dont have user with that id".to_string()))
}

// Echo the posted user back with a fixed id
pub async fn test_post_endpoint(JsonBody(mut user): JsonBody<User>) -> (StatusCode, Json<User>) {
    user.id = ECHO_USER_ID.to_string();
    (StatusCode::CREATED, Json(user))
}
