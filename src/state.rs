use std::sync::Arc;

use crate::auth::{CredentialStore, RoleHierarchy, SessionCache, TokenIssuer};

/// Shared application state, explicitly constructed at startup and injected
/// into the router. The session cache lives here (one instance per process)
/// rather than behind a global.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub sessions: Arc<SessionCache>,
    pub hierarchy: Arc<RoleHierarchy>,
    pub signing_key: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        signing_key: String,
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        // Session TTL equals the access-token lifetime: a session that can no
        // longer present a live access token has nothing left to validate.
        let sessions = Arc::new(SessionCache::new(access_ttl_secs));
        let issuer = Arc::new(TokenIssuer::new(
            store,
            sessions.clone(),
            signing_key.clone(),
            access_ttl_secs,
            refresh_ttl_secs,
        ));

        Self {
            issuer,
            sessions,
            hierarchy: Arc::new(RoleHierarchy::builtin()),
            signing_key,
        }
    }
}
