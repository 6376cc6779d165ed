//! Namespaced key-value storage over a pluggable persistent medium.
//!
//! [`FileStore`] is the production implementation (one directory per
//! namespace under the platform config dir); [`MemoryStore`] is the test
//! double. Every operation degrades to a failure value instead of
//! panicking so the engine keeps working, memory-less, when storage is
//! disabled or full.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use uuid::Uuid;

/// Namespace used only by the availability probe.
const PROBE_NAMESPACE: &str = "probe";

/// Abstraction over the persistent key-value medium.
///
/// Contract: no method panics. When the medium is unusable, `get` returns
/// `None`, `keys` returns an empty list, and the mutating operations return
/// false, so callers degrade gracefully.
pub trait KeyValueStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String>;
    fn set(&self, namespace: &str, key: &str, value: &str) -> bool;
    fn delete(&self, namespace: &str, key: &str) -> bool;
    fn keys(&self, namespace: &str) -> Vec<String>;
    fn clear(&self, namespace: &str) -> bool;

    /// Probe the medium with a write/read/delete round-trip on a throwaway
    /// key. Returns false on any failure (storage disabled, quota
    /// exhausted) rather than erroring.
    fn is_available(&self) -> bool {
        let probe_key = format!("probe_{}", Uuid::new_v4().simple());
        if !self.set(PROBE_NAMESPACE, &probe_key, "probe") {
            return false;
        }
        let read_back = self.get(PROBE_NAMESPACE, &probe_key);
        self.delete(PROBE_NAMESPACE, &probe_key);
        read_back.as_deref() == Some("probe")
    }
}

/// A namespace or key is a single path component: no separators, no leading
/// dot, ASCII alphanumerics plus `_` and `-`.
fn valid_component(component: &str) -> bool {
    !component.is_empty()
        && !component.starts_with('.')
        && component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

/// File-backed store: `<config dir>/store/<namespace>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "tint").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;
        Self::with_root(project_dirs.config_dir().join("store"))
    }

    /// Creates a store rooted at an explicit directory.
    pub fn with_root(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn entry_path(&self, namespace: &str, key: &str) -> Option<PathBuf> {
        if !valid_component(namespace) || !valid_component(key) {
            return None;
        }
        Some(self.root.join(namespace).join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        let path = self.entry_path(namespace, key)?;
        fs::read_to_string(path).ok()
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> bool {
        let Some(path) = self.entry_path(namespace, key) else {
            return false;
        };
        if fs::create_dir_all(self.root.join(namespace)).is_err() {
            return false;
        }
        fs::write(path, value).is_ok()
    }

    fn delete(&self, namespace: &str, key: &str) -> bool {
        let Some(path) = self.entry_path(namespace, key) else {
            return false;
        };
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(err) => err.kind() == io::ErrorKind::NotFound,
        }
    }

    fn keys(&self, namespace: &str) -> Vec<String> {
        if !valid_component(namespace) {
            return Vec::new();
        }
        let Ok(entries) = fs::read_dir(self.root.join(namespace)) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(|key| key.to_string())
            })
            .collect();
        keys.sort();
        keys
    }

    fn clear(&self, namespace: &str) -> bool {
        if !valid_component(namespace) {
            return false;
        }
        let dir = self.root.join(namespace);
        if !dir.exists() {
            return true;
        }
        fs::remove_dir_all(dir).is_ok()
    }
}

/// In-memory store for tests and integrators without a durable medium.
/// The availability flag simulates a disabled or quota-exhausted medium.
pub struct MemoryStore {
    available: Cell<bool>,
    entries: RefCell<BTreeMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            available: Cell::new(true),
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// Toggle simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        if !self.available.get() {
            return None;
        }
        self.entries
            .borrow()
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> bool {
        if !self.available.get() {
            return false;
        }
        self.entries
            .borrow_mut()
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        true
    }

    fn delete(&self, namespace: &str, key: &str) -> bool {
        if !self.available.get() {
            return false;
        }
        self.entries
            .borrow_mut()
            .remove(&(namespace.to_string(), key.to_string()));
        true
    }

    fn keys(&self, namespace: &str) -> Vec<String> {
        if !self.available.get() {
            return Vec::new();
        }
        self.entries
            .borrow()
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, key)| key.clone())
            .collect()
    }

    fn clear(&self, namespace: &str) -> bool {
        if !self.available.get() {
            return false;
        }
        self.entries
            .borrow_mut()
            .retain(|(ns, _), _| ns != namespace);
        true
    }
}
