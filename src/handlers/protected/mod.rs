// Protected handlers: bearer authentication required (/api/*).

pub mod auth;
pub mod system;
