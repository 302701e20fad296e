use thiserror::Error;

/// Authentication/authorization failure kinds.
///
/// Every variant is recoverable at the request boundary: the first eight map
/// to HTTP 401, `Forbidden` maps to 403, and `Internal` is the only kind that
/// surfaces as a 500. Each kind carries a stable numeric flag that is included
/// in the response body so clients can branch without parsing messages.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature verification failed")]
    BadSignature,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Wrong token kind for this operation")]
    WrongTokenKind,

    #[error("Session expired or superseded")]
    SessionExpired,

    #[error("Account '{0}' not found")]
    NotFound(String),

    #[error("Account '{0}' is disabled")]
    AccountDisabled(String),

    #[error("Invalid credentials")]
    BadCredential,

    #[error("Missing required role '{0}'")]
    Forbidden(String),

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable numeric flag carried in error response bodies.
    pub fn flag(&self) -> u32 {
        match self {
            AuthError::MalformedToken(_) => 40101,
            AuthError::BadSignature => 40102,
            AuthError::TokenExpired => 40103,
            AuthError::WrongTokenKind => 40104,
            AuthError::SessionExpired => 40105,
            AuthError::NotFound(_) => 40106,
            AuthError::AccountDisabled(_) => 40107,
            AuthError::BadCredential => 40108,
            AuthError::Forbidden(_) => 40301,
            AuthError::Internal(_) => 50000,
        }
    }
}
