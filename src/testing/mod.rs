use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{password, AuthError, CredentialRecord, CredentialStore};

/// In-memory credential store for tests. Passwords are stored as real Argon2
/// hashes so the full verification path is exercised.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<Mutex<HashMap<String, CredentialRecord>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str, raw_password: &str, enabled: bool, role_codes: &[&str]) -> Uuid {
        let id = Uuid::new_v4();
        let record = CredentialRecord {
            id,
            name: name.to_string(),
            password_hash: password::hash_password(raw_password).expect("test hash"),
            enabled,
            role_codes: role_codes.iter().map(|s| s.to_string()).collect(),
        };
        self.users.lock().unwrap().insert(name.to_string(), record);
        id
    }

    pub fn set_enabled(&self, name: &str, enabled: bool) {
        if let Some(record) = self.users.lock().unwrap().get_mut(name) {
            record.enabled = enabled;
        }
    }

    pub fn remove_user(&self, name: &str) {
        self.users.lock().unwrap().remove(name);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn lookup(&self, principal_name: &str) -> Result<Option<CredentialRecord>, AuthError> {
        Ok(self.users.lock().unwrap().get(principal_name).cloned())
    }
}
