use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use uuid::Uuid;

use super::error::AuthError;

/// Credential material for one account, as held by the external store.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub enabled: bool,
    pub role_codes: Vec<String>,
}

/// Lookup seam to the external credential store. The auth core consumes this
/// interface; it never writes through it.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn lookup(&self, principal_name: &str) -> Result<Option<CredentialRecord>, AuthError>;
}

/// Postgres-backed credential store reading from the shared `users` table.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn lookup(&self, principal_name: &str) -> Result<Option<CredentialRecord>, AuthError> {
        let query = r#"
            SELECT id, name, password_hash, enabled, role_codes
            FROM users
            WHERE name = $1
            AND deleted_at IS NULL
        "#;

        let row = sqlx::query(query)
            .bind(principal_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("credential lookup failed for '{}': {}", principal_name, e);
                AuthError::Internal("credential store unavailable".to_string())
            })?;

        Ok(row.map(|row| CredentialRecord {
            id: row.get("id"),
            name: row.get("name"),
            password_hash: row.get("password_hash"),
            enabled: row.get("enabled"),
            role_codes: row.get("role_codes"),
        }))
    }
}
