// handlers/public/auth/login.rs - POST /access-token handler

use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::auth::TokenPair;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account_name: String,
    pub account_password: String,
}

/// POST /access-token - Authenticate credentials and receive a token pair
///
/// Expected Input:
/// ```json
/// { "accountName": "alice", "accountPassword": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "expiresInSeconds": 1800,
///   "accessToken": "eyJhbGciOiJIUzI1NiI...",
///   "refreshToken": "eyJhbGciOiJIUzI1NiI..."
/// }
/// ```
///
/// Every failure kind (unknown account, disabled account, bad password)
/// comes back as 401 with a stable numeric code in the body.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state
        .issuer
        .login(&payload.account_name, &payload.account_password)
        .await?;
    Ok(Json(pair))
}
