// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth, token acquisition) -> Protected (bearer auth, /api/*).
// Role-gated routes additionally carry a RoleGuard layer in the router.

pub mod protected;
pub mod public;
