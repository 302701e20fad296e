use std::sync::Arc;

use serde::Serialize;

use super::claims::{self, Claims, TokenKind};
use super::error::AuthError;
use super::password;
use super::session::{SessionCache, SessionRecord};
use super::store::{CredentialRecord, CredentialStore};

/// Access/refresh token pair returned to the client. The two tokens are
/// independently verifiable; they are correlated only through the session
/// record on the server, never through a field inside the tokens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub expires_in_seconds: u64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Orchestrates credential validation, token minting, and session placement.
///
/// Both operations perform exactly one session cache write, and only after
/// every fallible step has succeeded: either the full pair is minted and
/// cached, or an error is raised and the previous session state is untouched.
pub struct TokenIssuer {
    store: Arc<dyn CredentialStore>,
    sessions: Arc<SessionCache>,
    signing_key: String,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        sessions: Arc<SessionCache>,
        signing_key: String,
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            sessions,
            signing_key,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Validate a raw credential and mint a fresh pair, overwriting any prior
    /// session for this principal.
    pub async fn login(&self, principal_name: &str, raw_password: &str) -> Result<TokenPair, AuthError> {
        let credential = self.fetch_enabled(principal_name).await?;

        if !password::verify_password(raw_password, &credential.password_hash)? {
            tracing::warn!("login rejected for '{}': bad credential", principal_name);
            return Err(AuthError::BadCredential);
        }

        let pair = self.mint_and_cache(&credential)?;
        tracing::info!("session established for '{}'", principal_name);
        Ok(pair)
    }

    /// Rotate a refresh token into a brand-new pair.
    ///
    /// The presented string must byte-equal the refresh token in the live
    /// session record; anything superseded by a later login/refresh fails
    /// with `SessionExpired`. The credential is re-fetched so a deleted or
    /// disabled account cannot keep refreshing.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = claims::verify(&self.signing_key, refresh_token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::WrongTokenKind);
        }

        match self.sessions.get(&claims.sub) {
            Some(record) if record.refresh_token == refresh_token => {}
            _ => {
                tracing::warn!("refresh rejected for '{}': no live session", claims.sub);
                return Err(AuthError::SessionExpired);
            }
        }

        let credential = self.fetch_enabled(&claims.sub).await?;

        let pair = self.mint_and_cache(&credential)?;
        tracing::info!("session rotated for '{}'", claims.sub);
        Ok(pair)
    }

    async fn fetch_enabled(&self, principal_name: &str) -> Result<CredentialRecord, AuthError> {
        let credential = self
            .store
            .lookup(principal_name)
            .await?
            .ok_or_else(|| AuthError::NotFound(principal_name.to_string()))?;

        if !credential.enabled {
            tracing::warn!("account '{}' is disabled", principal_name);
            return Err(AuthError::AccountDisabled(principal_name.to_string()));
        }
        Ok(credential)
    }

    fn mint_and_cache(&self, credential: &CredentialRecord) -> Result<TokenPair, AuthError> {
        let access_claims = Claims::new(
            &credential.name,
            &credential.role_codes,
            TokenKind::Access,
            self.access_ttl_secs,
        );
        let refresh_claims = Claims::new(
            &credential.name,
            &credential.role_codes,
            TokenKind::Refresh,
            self.refresh_ttl_secs,
        );

        let access_token = claims::mint(&self.signing_key, &access_claims)?;
        let refresh_token = claims::mint(&self.signing_key, &refresh_claims)?;

        // Single atomic replacement: this write is what supersedes any
        // previously issued pair for this principal.
        self.sessions.put(SessionRecord {
            principal_id: credential.id,
            principal_name: credential.name.clone(),
            role_codes: credential.role_codes.clone(),
            access_token: access_token.clone(),
            refresh_token: refresh_token.clone(),
        });

        Ok(TokenPair {
            expires_in_seconds: self.access_ttl_secs,
            access_token,
            refresh_token,
        })
    }
}
