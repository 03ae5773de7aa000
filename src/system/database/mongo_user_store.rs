use async_trait::async_trait;
use bson::doc;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::models::User;
use crate::system::store::{StoreError, UserStore};

pub const USERS_COLLECTION: &str = "users";

// Stored shape of a user; the id lives in `_id`
#[derive(Debug, Serialize, Deserialize, Clone)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    avatar: String,
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            username: doc.username,
            password: doc.password,
            first_name: doc.first_name,
            last_name: doc.last_name,
            avatar: doc.avatar,
        }
    }
}

pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    async fn find_one(&self, filter: bson::Document) -> Result<User, StoreError> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn get(&self, id: &str) -> Result<User, StoreError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn get_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        self.find_one(doc! { "username": username, "password": password })
            .await
    }

    async fn create(&self, mut user: User) -> Result<User, StoreError> {
        user.id = Uuid::new_v4().to_string();

        self.collection
            .insert_one(UserDocument::from(user.clone()))
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(user)
    }
}
