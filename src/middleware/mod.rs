pub mod auth;
pub mod require_role;

pub use auth::{auth_gate, Identity};
pub use require_role::{require_role, RoleGuard};
