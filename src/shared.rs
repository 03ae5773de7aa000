pub mod error;
pub mod extract;
pub mod models;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_support;
