pub mod user;

// Re-export for easier access
pub use user::User;
