use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{claims, AuthError, TokenKind};
use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

/// Request-scoped identity established by the authentication gate.
///
/// A snapshot of the session record: downstream handlers and the audit
/// logger read this, never the token itself. Extract `Identity` to require
/// authentication, or `Option<Identity>` on endpoints that accept anonymous
/// callers.
#[derive(Clone, Debug)]
pub struct Identity {
    pub principal_id: Uuid,
    pub principal_name: String,
    pub role_codes: Vec<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Authentication gate, run on every request.
///
/// A missing or non-Bearer authorization header means anonymous: the request
/// proceeds without an identity and endpoint-level extraction decides whether
/// that is acceptable. A header that is present but fails verification is a
/// hard 401; it never falls through to anonymous. Paths on the configured
/// allow-list skip verification entirely.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let Some(token) = extract_bearer_token(request.headers()) else {
        return Ok(next.run(request).await);
    };

    match authenticate(&state, &token) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(err @ AuthError::Internal(_)) => {
            // Unexpected failure while checking the credential: no identity
            // is established and the client gets a generic 500.
            Err(err.into())
        }
        Err(err) => {
            tracing::warn!("authentication rejected: {}", err);
            Err(err.into())
        }
    }
}

/// Verify a presented access token against the codec and the session cache.
fn authenticate(state: &AppState, token: &str) -> Result<Identity, AuthError> {
    let claims = claims::verify(&state.signing_key, token)?;

    if claims.kind != TokenKind::Access {
        return Err(AuthError::WrongTokenKind);
    }

    // The token must be the one the live session currently holds; anything
    // superseded by a later login/refresh is dead even if unexpired.
    let record = state
        .sessions
        .get(&claims.sub)
        .filter(|record| record.access_token == token)
        .ok_or(AuthError::SessionExpired)?;

    Ok(Identity {
        principal_id: record.principal_id,
        principal_name: record.principal_name,
        role_codes: record.role_codes,
    })
}

/// Extract the bearer credential from the authorization header, if any.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn is_public_path(path: &str) -> bool {
    config::config().security.public_paths.iter().any(|pattern| {
        path == pattern || (pattern != "/" && path.starts_with(&format!("{}/", pattern)))
    })
}
