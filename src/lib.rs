// src/lib.rs

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod tryout;
pub mod utils;

// Re-export the router for the binary and integration tests
pub use routes::create_router;
