use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

/// Server-held session state for one principal: the identity snapshot taken
/// at mint time plus the one currently valid token pair.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub principal_id: Uuid,
    pub principal_name: String,
    pub role_codes: Vec<String>,
    pub access_token: String,
    pub refresh_token: String,
}

struct CachedSession {
    record: SessionRecord,
    inserted_at: Instant,
}

/// In-memory, TTL-bounded session store. One record per principal.
///
/// Every `put` is a full replacement that resets the TTL; overwriting is the
/// mechanism that invalidates all previously issued tokens for a principal.
/// Expired entries are evicted lazily on read, so "never logged in" and "TTL
/// elapsed" are indistinguishable to callers. There is no delete path: a
/// session ends by expiring or by being overwritten.
pub struct SessionCache {
    sessions: DashMap<String, CachedSession>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Unconditional overwrite; resets the TTL for this principal.
    pub fn put(&self, record: SessionRecord) {
        self.sessions.insert(
            record.principal_name.clone(),
            CachedSession {
                record,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Read-only lookup. Absence means session invalid, whatever the cause.
    pub fn get(&self, principal_name: &str) -> Option<SessionRecord> {
        let entry = self.sessions.get(principal_name)?;
        if entry.inserted_at.elapsed() >= self.ttl {
            drop(entry);
            self.sessions.remove(principal_name);
            return None;
        }
        Some(entry.record.clone())
    }
}
