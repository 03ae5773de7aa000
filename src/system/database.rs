pub mod database_manager;
pub mod mongo_user_store;

pub use database_manager::*;
pub use mongo_user_store::MongoUserStore;
