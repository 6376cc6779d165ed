//! Versioned serialization envelope for persisted values.
//!
//! Every stored value is wrapped as `{ data, timestamp, version }` so reads
//! stay forward-compatible: unknown extra fields are ignored, and a value
//! carrying a version tag this build does not understand is treated as
//! absent rather than an error.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::ENVELOPE_VERSION;
use crate::storage::kv::KeyValueStore;

/// Stored shape of every persisted value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Value,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl Envelope {
    /// Wrap a serializable value, stamping it with the current time and the
    /// current format version.
    pub fn wrap<T: Serialize>(value: &T) -> Option<Envelope> {
        let data = serde_json::to_value(value).ok()?;
        Some(Envelope {
            data,
            timestamp: Utc::now(),
            version: ENVELOPE_VERSION.to_string(),
        })
    }

    /// Serialize to the stored string form.
    pub fn encode(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Parse a stored string. Returns `None` for malformed JSON or an
    /// unrecognized format version; both cases are logged and treated as
    /// absent so callers fall back to their initial state.
    pub fn decode(raw: &str) -> Option<Envelope> {
        let envelope: Envelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "discarding unparseable stored value");
                return None;
            }
        };
        if envelope.version != ENVELOPE_VERSION {
            warn!(version = %envelope.version, "discarding stored value with unknown format version");
            return None;
        }
        Some(envelope)
    }

    /// Deserialize the wrapped data into a concrete type.
    pub fn open<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.data.clone()).ok()
    }
}

/// Read and unwrap the envelope stored under `namespace`/`key`.
pub fn read(store: &dyn KeyValueStore, namespace: &str, key: &str) -> Option<Envelope> {
    let raw = store.get(namespace, key)?;
    Envelope::decode(&raw)
}

/// Wrap `value` in a fresh envelope and store it under `namespace`/`key`.
/// Returns false when serialization or the underlying write fails.
pub fn write<T: Serialize>(
    store: &dyn KeyValueStore,
    namespace: &str,
    key: &str,
    value: &T,
) -> bool {
    let Some(envelope) = Envelope::wrap(value) else {
        return false;
    };
    let Some(encoded) = envelope.encode() else {
        return false;
    };
    store.set(namespace, key, &encoded)
}
