use axum::response::Json;
use serde_json::{json, Value};

/// GET /api/system/status - Role-gated status endpoint
///
/// Requires the SYS role (or an ancestor such as ROOT) via the RoleGuard
/// layer in the router; the handler itself only reports.
pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
