//! Client-side cache for domain records awaiting remote persistence.
//!
//! Entries are keyed by a caller-chosen logical id (`quote_<id>`,
//! `simulation_<id>`) and stamped with a capture time. There is no TTL or
//! eviction: entries live until explicitly removed or synced, and the cache
//! is bounded by the handful of pending actions a single user accumulates.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::constants::OFFLINE_NAMESPACE;
use crate::storage::envelope;
use crate::storage::kv::KeyValueStore;

/// A cached record with its capture time.
#[derive(Debug, Clone)]
pub struct OfflineRecord {
    pub key: String,
    pub payload: Value,
    pub captured_at: DateTime<Utc>,
}

pub struct OfflineCache {
    kv: Rc<dyn KeyValueStore>,
}

impl OfflineCache {
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Store a payload under `key`, stamping the capture time. Overwrites
    /// any previous entry for the same key.
    pub fn put(&self, key: &str, payload: &Value) -> bool {
        envelope::write(self.kv.as_ref(), OFFLINE_NAMESPACE, key, payload)
    }

    /// The cached payload, or `None` when absent or unreadable.
    pub fn get(&self, key: &str) -> Option<Value> {
        envelope::read(self.kv.as_ref(), OFFLINE_NAMESPACE, key).map(|envelope| envelope.data)
    }

    /// The cached payload together with its capture timestamp.
    pub fn get_record(&self, key: &str) -> Option<OfflineRecord> {
        envelope::read(self.kv.as_ref(), OFFLINE_NAMESPACE, key).map(|envelope| OfflineRecord {
            key: key.to_string(),
            payload: envelope.data,
            captured_at: envelope.timestamp,
        })
    }

    pub fn remove(&self, key: &str) -> bool {
        self.kv.delete(OFFLINE_NAMESPACE, key)
    }

    /// All cached keys, in the store's enumeration order.
    pub fn keys(&self) -> Vec<String> {
        self.kv.keys(OFFLINE_NAMESPACE)
    }

    pub fn clear(&self) -> bool {
        self.kv.clear(OFFLINE_NAMESPACE)
    }
}
