// handlers/public/auth/refresh.rs - GET /refresh-token/:refresh_token handler

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::auth::TokenPair;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /refresh-token/:refresh_token - Rotate a refresh token into a new pair
///
/// The presented token must be REFRESH-kind and must match the refresh token
/// held by the principal's live session; the previous pair is superseded on
/// success. Same response shape as login; any failure is a 401.
pub async fn refresh_get(
    State(state): State<AppState>,
    Path(refresh_token): Path<String>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.issuer.refresh(&refresh_token).await?;
    Ok(Json(pair))
}
