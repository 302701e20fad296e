// Token authentication core: codec, session cache, issuer, role hierarchy.
//
// Everything here is consumed by the HTTP layer (middleware + handlers); the
// credential store and password verifier are the seams to the external
// user/role services.

pub mod claims;
pub mod error;
pub mod hierarchy;
pub mod issuer;
pub mod password;
pub mod session;
pub mod store;

pub use claims::{Claims, TokenKind};
pub use error::AuthError;
pub use hierarchy::{AccessDecision, RoleHierarchy};
pub use issuer::{TokenIssuer, TokenPair};
pub use session::{SessionCache, SessionRecord};
pub use store::{CredentialRecord, CredentialStore, PgCredentialStore};
