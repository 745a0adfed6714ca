//! Credential storage behind a swappable trait.
//!
//! Everything here is in-memory by design: a process restart discards all
//! codes and token bookkeeping. The trait exists so a persistent backend
//! can be injected without touching redemption logic.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::code::CodeRecord;
use super::ActivationError;

/// Storage key: SHA-256 digest of the display code.
pub type CodeDigest = [u8; 32];

// ═══════════════════════════════════════════════════════════
// CodeStore trait
// ═══════════════════════════════════════════════════════════

/// Keyed storage for pending activation codes.
///
/// `remove` must be atomic with respect to concurrent callers for the
/// same key; redemption relies on remove-if-present to guarantee that
/// a code is consumed at most once.
pub trait CodeStore: Send + Sync {
    fn put(&self, digest: CodeDigest, record: CodeRecord) -> Result<(), ActivationError>;

    fn get(&self, digest: &CodeDigest) -> Result<Option<CodeRecord>, ActivationError>;

    /// Remove and return the record, if present.
    fn remove(&self, digest: &CodeDigest) -> Result<Option<CodeRecord>, ActivationError>;

    /// Evict every record past its expiry. Returns the eviction count.
    fn sweep(&self, now: DateTime<Utc>) -> Result<usize, ActivationError>;

    fn len(&self) -> Result<usize, ActivationError>;

    fn is_empty(&self) -> Result<bool, ActivationError> {
        Ok(self.len()? == 0)
    }
}

// ═══════════════════════════════════════════════════════════
// In-memory implementation
// ═══════════════════════════════════════════════════════════

/// Default `CodeStore`: one mutex around a digest-keyed map.
///
/// The single lock makes every lookup-and-evict a critical section, so
/// two concurrent redemptions of one code cannot both observe it.
#[derive(Default)]
pub struct InMemoryCodeStore {
    entries: Mutex<HashMap<CodeDigest, CodeRecord>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CodeDigest, CodeRecord>>, ActivationError> {
        self.entries.lock().map_err(|_| ActivationError::LockPoisoned)
    }
}

impl CodeStore for InMemoryCodeStore {
    fn put(&self, digest: CodeDigest, record: CodeRecord) -> Result<(), ActivationError> {
        self.lock()?.insert(digest, record);
        Ok(())
    }

    fn get(&self, digest: &CodeDigest) -> Result<Option<CodeRecord>, ActivationError> {
        Ok(self.lock()?.get(digest).cloned())
    }

    fn remove(&self, digest: &CodeDigest) -> Result<Option<CodeRecord>, ActivationError> {
        Ok(self.lock()?.remove(digest))
    }

    fn sweep(&self, now: DateTime<Utc>) -> Result<usize, ActivationError> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, record| !record.is_expired(now));
        Ok(before - entries.len())
    }

    fn len(&self) -> Result<usize, ActivationError> {
        Ok(self.lock()?.len())
    }
}

// ═══════════════════════════════════════════════════════════
// Token registry
// ═══════════════════════════════════════════════════════════

/// Bookkeeping of issued token ids and their expiries.
///
/// Verification is stateless (signature + `exp` are authoritative); the
/// registry only gives the sweep something to evict, mirroring how codes
/// are cleaned up. There is no revocation path; entries leave the
/// registry solely by expiring.
#[derive(Default)]
pub struct TokenRegistry {
    issued: Mutex<HashMap<Uuid, DateTime<Utc>>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, DateTime<Utc>>>, ActivationError> {
        self.issued.lock().map_err(|_| ActivationError::LockPoisoned)
    }

    pub fn register(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), ActivationError> {
        self.lock()?.insert(jti, expires_at);
        Ok(())
    }

    pub fn sweep(&self, now: DateTime<Utc>) -> Result<usize, ActivationError> {
        let mut issued = self.lock()?;
        let before = issued.len();
        issued.retain(|_, expires_at| now <= *expires_at);
        Ok(before - issued.len())
    }

    pub fn len(&self) -> Result<usize, ActivationError> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::code::{hash_code, ValidityPeriod};
    use chrono::Duration;

    fn record(period: ValidityPeriod) -> CodeRecord {
        CodeRecord::new(period, Utc::now())
    }

    fn expired_record() -> CodeRecord {
        let created = Utc::now() - Duration::hours(2);
        CodeRecord::new(ValidityPeriod::OneHour, created)
    }

    #[test]
    fn put_get_roundtrip() {
        let store = InMemoryCodeStore::new();
        let digest = hash_code("ABCD2345");
        let rec = record(ValidityPeriod::OneDay);

        store.put(digest, rec.clone()).unwrap();
        assert_eq!(store.get(&digest).unwrap(), Some(rec));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn get_unknown_is_none() {
        let store = InMemoryCodeStore::new();
        assert_eq!(store.get(&hash_code("ABCD2345")).unwrap(), None);
    }

    #[test]
    fn remove_returns_record_once() {
        let store = InMemoryCodeStore::new();
        let digest = hash_code("ABCD2345");
        store.put(digest, record(ValidityPeriod::OneHour)).unwrap();

        assert!(store.remove(&digest).unwrap().is_some());
        assert!(store.remove(&digest).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn sweep_evicts_only_expired() {
        let store = InMemoryCodeStore::new();
        store.put(hash_code("EXPIRED2"), expired_record()).unwrap();
        store
            .put(hash_code("FRESHAAA"), record(ValidityPeriod::OneDay))
            .unwrap();

        let evicted = store.sweep(Utc::now()).unwrap();
        assert_eq!(evicted, 1);
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get(&hash_code("FRESHAAA")).unwrap().is_some());
        assert!(store.get(&hash_code("EXPIRED2")).unwrap().is_none());
    }

    #[test]
    fn sweep_on_empty_store_is_zero() {
        let store = InMemoryCodeStore::new();
        assert_eq!(store.sweep(Utc::now()).unwrap(), 0);
    }

    #[test]
    fn registry_sweep_evicts_expired_tokens() {
        let registry = TokenRegistry::new();
        let now = Utc::now();
        registry
            .register(Uuid::new_v4(), now - Duration::minutes(1))
            .unwrap();
        registry
            .register(Uuid::new_v4(), now + Duration::minutes(30))
            .unwrap();

        assert_eq!(registry.len().unwrap(), 2);
        assert_eq!(registry.sweep(now).unwrap(), 1);
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn registry_keeps_tokens_until_expiry() {
        let registry = TokenRegistry::new();
        let now = Utc::now();
        registry
            .register(Uuid::new_v4(), now + Duration::hours(1))
            .unwrap();

        assert_eq!(registry.sweep(now).unwrap(), 0);
        assert_eq!(registry.len().unwrap(), 1);
    }
}
