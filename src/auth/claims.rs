use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Token kind discriminator. Access tokens authorize API calls; refresh
/// tokens are accepted only by the refresh endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "ACCESS")]
    Access,
    #[serde(rename = "REFRESH")]
    Refresh,
}

/// Claim set carried inside a signed token.
///
/// Role codes are a snapshot taken at mint time; they are comma-joined on the
/// wire to keep the payload compact. The set is immutable once minted and is
/// reconstructed by decoding on every verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal name (account name).
    pub sub: String,
    /// Comma-joined role/menu codes, mint-time snapshot.
    pub roles: String,
    pub kind: TokenKind,
    pub nbf: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(principal: &str, role_codes: &[String], kind: TokenKind, ttl_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: principal.to_string(),
            roles: role_codes.join(","),
            kind,
            nbf: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Role codes split back out of the wire representation.
    pub fn role_codes(&self) -> Vec<String> {
        self.roles
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

/// Sign a claim set with an HS256 key derived from `signing_key`.
pub fn mint(signing_key: &str, claims: &Claims) -> Result<String, AuthError> {
    if signing_key.is_empty() {
        return Err(AuthError::Internal("signing key not configured".to_string()));
    }

    let encoding_key = EncodingKey::from_secret(signing_key.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::Internal(format!("token encoding failed: {}", e)))
}

/// Decode and verify a token string. Pure function of (key, token, clock).
///
/// Enforces signature, expiry, and not-before. Not-before is always "now" at
/// mint time so an immature token cannot legitimately occur, but the check is
/// enforced regardless.
pub fn verify(signing_key: &str, token: &str) -> Result<Claims, AuthError> {
    if signing_key.is_empty() {
        return Err(AuthError::Internal("signing key not configured".to_string()));
    }

    let decoding_key = DecodingKey::from_secret(signing_key.as_bytes());
    let mut validation = Validation::default();
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            // Mint always sets nbf = now, so a not-yet-valid token cannot
            // come from this system; treat it as structurally bad.
            ErrorKind::ImmatureSignature => {
                AuthError::MalformedToken("token not yet valid".to_string())
            }
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            _ => AuthError::MalformedToken(e.to_string()),
        }
    })?;

    Ok(token_data.claims)
}
