pub mod dto;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;
