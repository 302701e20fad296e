pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Test support (in-memory credential store); also used by integration tests.
pub mod testing;
