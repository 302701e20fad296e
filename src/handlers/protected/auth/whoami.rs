use axum::response::Json;
use serde_json::{json, Value};

use crate::middleware::Identity;

/// GET /api/auth/whoami - Current authenticated identity
///
/// Returns the session snapshot established by the authentication gate. This
/// is the same accessor the audit logger and CRUD services use to attribute
/// actions; extracting `Identity` rejects anonymous callers with a 401.
pub async fn whoami(identity: Identity) -> Json<Value> {
    Json(json!({
        "principalId": identity.principal_id,
        "principalName": identity.principal_name,
        "roleCodes": identity.role_codes,
    }))
}
