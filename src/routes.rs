use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{auth_gate, require_role, RoleGuard};
use crate::state::AppState;

/// Assemble the full application router.
///
/// The authentication gate wraps everything, including public endpoints;
/// role guards are attached per route group. Lives in the library so tests
/// can drive the router in-process.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public token acquisition
        .merge(token_routes())
        // Protected API
        .merge(auth_routes())
        .merge(system_routes(&state))
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn token_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/access-token", post(auth::login_post))
        .route("/refresh-token/:refresh_token", get(auth::refresh_get))
}

fn auth_routes() -> Router<AppState> {
    use protected::auth;

    Router::new().route("/api/auth/whoami", get(auth::whoami))
}

fn system_routes(state: &AppState) -> Router<AppState> {
    use protected::system;

    Router::new()
        .route("/api/system/status", get(system::status))
        .layer(middleware::from_fn_with_state(
            RoleGuard::new(state.clone(), "SYS"),
            require_role,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Keystone Admin API",
        "version": version,
        "description": "Multi-tenant admin backend - token authentication core",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "login": "POST /access-token (public - token acquisition)",
            "refresh": "GET /refresh-token/:refreshToken (public - token rotation)",
            "whoami": "GET /api/auth/whoami (protected)",
            "system": "GET /api/system/status (protected, requires SYS role)",
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
