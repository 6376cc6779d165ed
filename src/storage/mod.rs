//! Persistent key-value storage layer.
//!
//! Everything the engine persists goes through the [`kv::KeyValueStore`]
//! trait wrapped in the [`envelope::Envelope`] serialization format, so the
//! backing medium can be swapped (file store in production, in-memory store
//! in tests) without touching engine logic.

pub mod envelope;
pub mod kv;

pub use envelope::Envelope;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
