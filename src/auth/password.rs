use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::error::AuthError;

/// Hash a raw password with Argon2id and a fresh random salt. Used by
/// provisioning tooling and test fixtures; the API itself only verifies.
pub fn hash_password(raw: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a raw password against a stored Argon2 hash. The params embedded in
/// the hash string drive verification, so older hashes keep working.
pub fn verify_password(raw: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::Internal(format!("stored hash unparseable: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("not-secret", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_internal_error() {
        assert!(matches!(
            verify_password("secret", "not-a-phc-string"),
            Err(AuthError::Internal(_))
        ));
    }
}
