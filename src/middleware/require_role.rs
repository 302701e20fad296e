use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{AccessDecision, AuthError};
use crate::error::ApiError;
use crate::middleware::auth::Identity;
use crate::state::AppState;

/// Declarative "requires role X" marker attached to a route group via
/// `axum::middleware::from_fn_with_state`.
#[derive(Clone)]
pub struct RoleGuard {
    state: AppState,
    required: &'static str,
}

impl RoleGuard {
    pub fn new(state: AppState, required: &'static str) -> Self {
        Self { state, required }
    }
}

/// Authorization layer. Runs after the authentication gate; an anonymous
/// request is a 401, an authenticated one lacking the role is a 403.
///
/// The hierarchy decision is matched explicitly here and converted straight
/// into a response, so a Forbidden outcome cannot be remapped by any error
/// handler further out.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Response {
    let Some(identity) = request.extensions().get::<Identity>() else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    match guard.state.hierarchy.check(&identity.role_codes, guard.required) {
        AccessDecision::Authorized => next.run(request).await,
        AccessDecision::Forbidden => {
            tracing::warn!(
                "authorization denied: '{}' lacks role '{}'",
                identity.principal_name,
                guard.required
            );
            ApiError::from(AuthError::Forbidden(guard.required.to_string())).into_response()
        }
    }
}
