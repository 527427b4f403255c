//! Key-value storage with a time-to-live per entry.
//!
//! Entries are stored as a JSON record `{"value": ..., "expiresAt": ...}`
//! where `expiresAt` is epoch milliseconds. Expiry is checked only when an
//! entry is read; an expired entry is removed by the read that observes it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::storage::StorageBackend;

/// Persisted form of a stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringEntry {
    pub value: String,
    /// Epoch milliseconds after which the entry is stale.
    #[serde(rename = "expiresAt", alias = "expiry")]
    pub expires_at: i64,
}

impl ExpiringEntry {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis > self.expires_at
    }
}

/// Expiring view over a [`StorageBackend`].
///
/// Reads and writes never fail from the caller's point of view: backend
/// errors and unreadable records are logged and treated as "nothing stored".
#[derive(Debug)]
pub struct ExpiringStore<S, C> {
    backend: S,
    clock: C,
}

impl<S: StorageBackend, C: Clock> ExpiringStore<S, C> {
    pub fn new(backend: S, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Store `value` under `key` for `ttl_millis` from now, replacing any
    /// previous entry.
    pub fn set(&self, key: &str, value: &str, ttl_millis: u64) {
        let ttl = i64::try_from(ttl_millis).unwrap_or(i64::MAX);
        let entry = ExpiringEntry {
            value: value.to_string(),
            expires_at: self.clock.now_millis().saturating_add(ttl),
        };

        let serialized = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize stored entry");
                return;
            }
        };

        match self.backend.set_item(key, &serialized) {
            Ok(()) => debug!(key, value, expires_at = entry.expires_at, "Stored entry"),
            Err(e) => warn!(key, error = %e, "Failed to write stored entry"),
        }
    }

    /// Read the value under `key`, or `None` if absent, expired or unreadable.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored entry");
                return None;
            }
        };

        let entry: ExpiringEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "Ignoring unreadable stored entry");
                return None;
            }
        };

        let now = self.clock.now_millis();
        if entry.is_expired(now) {
            debug!(key, expires_at = entry.expires_at, now, "Stored entry expired");
            if let Err(e) = self.backend.remove_item(key) {
                warn!(key, error = %e, "Failed to remove expired entry");
            }
            return None;
        }

        Some(entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    struct BrokenStorage;

    impl StorageBackend for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn store(now: i64) -> ExpiringStore<MemoryStorage, ManualClock> {
        ExpiringStore::new(MemoryStorage::new(), ManualClock::new(now))
    }

    // ==================== set / get Tests ====================

    #[test]
    fn test_set_then_get() {
        let store = store(1_000);
        store.set("lang", "en", 500);
        assert_eq!(store.get("lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_set_writes_json_record() {
        let store = store(1_000);
        store.set("lang", "ja", 500);

        let raw = store.backend().get_item("lang").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["value"], "ja");
        assert_eq!(json["expiresAt"], 1_500);
    }

    #[test]
    fn test_set_overwrites() {
        let store = store(1_000);
        store.set("lang", "en", 500);
        store.set("lang", "ja", 500);
        assert_eq!(store.get("lang").as_deref(), Some("ja"));
    }

    #[test]
    fn test_get_absent() {
        assert!(store(0).get("missing").is_none());
    }

    // ==================== Expiry Tests ====================

    #[test]
    fn test_entry_valid_at_exact_expiry() {
        let store = store(1_000);
        store.set("lang", "en", 500);
        store.clock().set(1_500);
        assert_eq!(store.get("lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_expired_entry_is_removed_on_read() {
        let store = store(1_000);
        store.set("lang", "en", 500);
        store.clock().advance(501);

        assert!(store.get("lang").is_none());
        assert!(store.backend().get_item("lang").unwrap().is_none());
    }

    #[test]
    fn test_expired_entry_stays_until_read() {
        let store = store(1_000);
        store.set("lang", "en", 10);
        store.clock().advance(1_000);

        assert!(store.backend().get_item("lang").unwrap().is_some());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let store = store(1_000);
        store.set("lang", "en", u64::MAX);
        assert_eq!(store.get("lang").as_deref(), Some("en"));
    }

    // ==================== Soft Failure Tests ====================

    #[test]
    fn test_malformed_record_is_absent() {
        let store = store(0);
        store.backend().set_item("lang", "{not json").unwrap();
        assert!(store.get("lang").is_none());
    }

    #[test]
    fn test_record_missing_expiry_is_absent() {
        let store = store(0);
        store.backend().set_item("lang", r#"{"value":"en"}"#).unwrap();
        assert!(store.get("lang").is_none());
    }

    #[test]
    fn test_legacy_expiry_field_is_accepted() {
        let store = store(0);
        store
            .backend()
            .set_item("lang", r#"{"value":"ja","expiry":100}"#)
            .unwrap();
        assert_eq!(store.get("lang").as_deref(), Some("ja"));
    }

    #[test]
    fn test_broken_backend_never_fails_caller() {
        let store = ExpiringStore::new(BrokenStorage, ManualClock::new(0));
        store.set("lang", "en", 100);
        assert!(store.get("lang").is_none());
    }
}
