// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Response bodies carry a stable numeric `code` flag plus a short message;
/// internal details never reach the client.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized { flag: u32, message: String },

    // 403 Forbidden
    Forbidden { flag: u32, message: String },

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized { .. } => 401,
            ApiError::Forbidden { .. } => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized { message, .. } => message,
            ApiError::Forbidden { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Stable numeric error flag for client handling
    pub fn flag(&self) -> u32 {
        match self {
            ApiError::BadRequest(_) => 40000,
            ApiError::Unauthorized { flag, .. } => *flag,
            ApiError::Forbidden { flag, .. } => *flag,
            ApiError::NotFound(_) => 40400,
            ApiError::InternalServerError(_) => 50000,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "code": self.flag(),
            "message": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            flag: 40100,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            flag: 40301,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let flag = err.flag();
        match err {
            // All authentication failure kinds surface as 401, including
            // principal-not-found, to avoid account enumeration.
            AuthError::MalformedToken(_)
            | AuthError::BadSignature
            | AuthError::TokenExpired
            | AuthError::WrongTokenKind
            | AuthError::SessionExpired
            | AuthError::NotFound(_)
            | AuthError::AccountDisabled(_)
            | AuthError::BadCredential => ApiError::Unauthorized {
                flag,
                message: "Authentication failed".to_string(),
            },
            AuthError::Forbidden(_) => ApiError::Forbidden {
                flag,
                message: "Insufficient permissions".to_string(),
            },
            AuthError::Internal(msg) => {
                // Log the real error but return a generic message
                tracing::error!("internal auth error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
