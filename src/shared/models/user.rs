use serde::{Deserialize, Serialize};

/// User record as exchanged over HTTP and persisted by the user stores.
///
/// Field names go out in PascalCase; lowercase spellings are accepted on
/// input so clients that send `username`/`password` still parse.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct User {
    #[serde(alias = "id")]
    pub id: String,
    #[serde(alias = "username")]
    pub username: String,
    #[serde(alias = "password")]
    pub password: String,
    #[serde(alias = "firstname", alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastname", alias = "lastName")]
    pub last_name: String,
    #[serde(alias = "avatar")]
    pub avatar: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar: avatar.into(),
        }
    }

    // Both credentials must be present before a user can be registered
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_pascal_case() {
        let user = User::new("1", "Cool_Dude", "qweasdzxc", "Alex", "Hopkins", "picture2");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["Id"], "1");
        assert_eq!(json["Username"], "Cool_Dude");
        assert_eq!(json["FirstName"], "Alex");
        assert_eq!(json["LastName"], "Hopkins");
        assert_eq!(json["Avatar"], "picture2");
    }

    #[test]
    fn test_user_accepts_lowercase_and_missing_fields() {
        let user: User =
            serde_json::from_str(r#"{"username": "dana", "password": "secret"}"#).unwrap();

        assert_eq!(user.username, "dana");
        assert_eq!(user.password, "secret");
        assert!(user.id.is_empty());
        assert!(user.first_name.is_empty());
        assert!(user.has_credentials());
    }

    #[test]
    fn test_user_credentials() {
        let user = User::new("", "dana", "", "", "", "");
        assert!(!user.has_credentials());
        assert!(user.matches_credentials("dana", ""));
        assert!(!user.matches_credentials("dana", "x"));
    }
}
