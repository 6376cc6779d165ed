//! Integration test: offline cache drain on reconnect
//!
//! Exercises the cache → coordinator → remote sink pipeline over an
//! in-memory store with scripted sink doubles: connectivity-driven drains,
//! retention of rejected and unrouted entries, prefix routing, sequential
//! ordering, and the reentrancy guard.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::{Rc, Weak};

use serde_json::{json, Value};
use tint::{
    ConnectivityMonitor, KeyValueStore, MemoryStore, OfflineCache, RemoteSink, SyncCoordinator,
    SyncRoute,
};

/// Sink double that records calls and can be scripted to reject writes.
struct ScriptedSink {
    name: &'static str,
    calls: RefCell<Vec<String>>,
    fail: Cell<bool>,
}

impl ScriptedSink {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            calls: RefCell::new(Vec::new()),
            fail: Cell::new(false),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RemoteSink for ScriptedSink {
    fn create(&self, key: &str, _payload: &Value) -> Result<String, Box<dyn Error>> {
        self.calls.borrow_mut().push(key.to_string());
        if self.fail.get() {
            return Err(format!("{} rejected {key}", self.name).into());
        }
        Ok(format!("{}-{key}", self.name))
    }
}

fn cache_over(kv: &Rc<MemoryStore>) -> OfflineCache {
    OfflineCache::new(Rc::clone(kv) as Rc<dyn KeyValueStore>)
}

// =============================================================================
// Connectivity-driven drain
// =============================================================================

#[test]
fn test_transition_to_online_drains_cache() {
    let kv = Rc::new(MemoryStore::new());
    let sink = ScriptedSink::new("quotes");

    let cache = cache_over(&kv);
    cache.put("quote_1", &json!({ "color": "Harbor Mist", "liters": 10 }));

    let monitor = ConnectivityMonitor::new(false);
    let coordinator = Rc::new(SyncCoordinator::new(
        cache_over(&kv),
        vec![SyncRoute::new("quote_", Rc::clone(&sink) as Rc<dyn RemoteSink>)],
    ));
    coordinator.start(&monitor);

    monitor.set_online(true);

    assert_eq!(sink.calls(), vec!["quote_1"]);
    assert!(cache.keys().is_empty());
}

#[test]
fn test_going_offline_does_not_drain() {
    let kv = Rc::new(MemoryStore::new());
    let sink = ScriptedSink::new("quotes");

    cache_over(&kv).put("quote_1", &json!({}));

    let monitor = ConnectivityMonitor::new(true);
    let coordinator = Rc::new(SyncCoordinator::new(
        cache_over(&kv),
        vec![SyncRoute::new("quote_", Rc::clone(&sink) as Rc<dyn RemoteSink>)],
    ));
    coordinator.start(&monitor);

    monitor.set_online(false);

    assert!(sink.calls().is_empty());
    assert_eq!(cache_over(&kv).keys(), vec!["quote_1"]);
}

#[test]
fn test_rejected_entry_survives_until_next_transition() {
    let kv = Rc::new(MemoryStore::new());
    let sink = ScriptedSink::new("quotes");
    sink.fail.set(true);

    cache_over(&kv).put("quote_1", &json!({}));

    let monitor = ConnectivityMonitor::new(false);
    let coordinator = Rc::new(SyncCoordinator::new(
        cache_over(&kv),
        vec![SyncRoute::new("quote_", Rc::clone(&sink) as Rc<dyn RemoteSink>)],
    ));
    coordinator.start(&monitor);

    monitor.set_online(true);
    assert_eq!(cache_over(&kv).keys(), vec!["quote_1"]);

    // Service recovers; the retry on the next transition succeeds
    sink.fail.set(false);
    monitor.set_online(false);
    monitor.set_online(true);

    assert_eq!(sink.calls(), vec!["quote_1", "quote_1"]);
    assert!(cache_over(&kv).keys().is_empty());
}

// =============================================================================
// Routing and ordering
// =============================================================================

#[test]
fn test_entries_route_by_key_prefix() {
    let kv = Rc::new(MemoryStore::new());
    let quotes = ScriptedSink::new("quotes");
    let simulations = ScriptedSink::new("simulations");

    let cache = cache_over(&kv);
    cache.put("quote_1", &json!({ "liters": 5 }));
    cache.put("simulation_7", &json!({ "room": "kitchen" }));

    let coordinator = SyncCoordinator::new(
        cache_over(&kv),
        vec![
            SyncRoute::new("quote_", Rc::clone(&quotes) as Rc<dyn RemoteSink>),
            SyncRoute::new("simulation_", Rc::clone(&simulations) as Rc<dyn RemoteSink>),
        ],
    );

    let report = coordinator.sync_once();
    assert_eq!(report.synced.len(), 2);
    assert_eq!(quotes.calls(), vec!["quote_1"]);
    assert_eq!(simulations.calls(), vec!["simulation_7"]);
}

#[test]
fn test_drain_processes_entries_in_enumeration_order() {
    let kv = Rc::new(MemoryStore::new());
    let sink = ScriptedSink::new("quotes");

    let cache = cache_over(&kv);
    cache.put("quote_1", &json!(1));
    cache.put("quote_2", &json!(2));
    cache.put("quote_3", &json!(3));

    let coordinator = SyncCoordinator::new(
        cache_over(&kv),
        vec![SyncRoute::new("quote_", Rc::clone(&sink) as Rc<dyn RemoteSink>)],
    );

    let report = coordinator.sync_once();
    assert_eq!(report.synced, vec!["quote_1", "quote_2", "quote_3"]);
    assert_eq!(sink.calls(), vec!["quote_1", "quote_2", "quote_3"]);
}

#[test]
fn test_partial_failure_retains_only_failed_entries() {
    let kv = Rc::new(MemoryStore::new());
    let quotes = ScriptedSink::new("quotes");
    let simulations = ScriptedSink::new("simulations");
    simulations.fail.set(true);

    let cache = cache_over(&kv);
    cache.put("quote_1", &json!({}));
    cache.put("simulation_7", &json!({}));

    let coordinator = SyncCoordinator::new(
        cache_over(&kv),
        vec![
            SyncRoute::new("quote_", Rc::clone(&quotes) as Rc<dyn RemoteSink>),
            SyncRoute::new("simulation_", Rc::clone(&simulations) as Rc<dyn RemoteSink>),
        ],
    );

    let report = coordinator.sync_once();
    assert_eq!(report.synced, vec!["quote_1"]);
    assert_eq!(report.retained, vec!["simulation_7"]);
    assert_eq!(cache.keys(), vec!["simulation_7"]);
}

// =============================================================================
// Reentrancy guard
// =============================================================================

/// Sink that re-invokes the coordinator from inside `create`, simulating a
/// second online transition arriving while a drain is in flight.
struct ReentrantSink {
    coordinator: RefCell<Weak<SyncCoordinator>>,
    calls: RefCell<Vec<String>>,
}

impl RemoteSink for ReentrantSink {
    fn create(&self, key: &str, _payload: &Value) -> Result<String, Box<dyn Error>> {
        self.calls.borrow_mut().push(key.to_string());
        if let Some(coordinator) = self.coordinator.borrow().upgrade() {
            let nested = coordinator.sync_once();
            assert!(nested.is_empty(), "nested drain must be a no-op");
        }
        Ok(format!("srv-{key}"))
    }
}

#[test]
fn test_reentrant_sync_does_not_double_drain() {
    let kv = Rc::new(MemoryStore::new());
    let sink = Rc::new(ReentrantSink {
        coordinator: RefCell::new(Weak::new()),
        calls: RefCell::new(Vec::new()),
    });

    let cache = cache_over(&kv);
    cache.put("quote_1", &json!(1));
    cache.put("quote_2", &json!(2));

    let coordinator = Rc::new(SyncCoordinator::new(
        cache_over(&kv),
        vec![SyncRoute::new("quote_", Rc::clone(&sink) as Rc<dyn RemoteSink>)],
    ));
    *sink.coordinator.borrow_mut() = Rc::downgrade(&coordinator);

    let report = coordinator.sync_once();
    assert_eq!(report.synced, vec!["quote_1", "quote_2"]);
    // Each key written remotely exactly once despite the nested calls
    assert_eq!(*sink.calls.borrow(), vec!["quote_1", "quote_2"]);

    // The guard resets once the drain finishes
    assert!(coordinator.sync_once().is_empty());
    cache.put("quote_3", &json!(3));
    assert_eq!(coordinator.sync_once().synced, vec!["quote_3"]);
}

// =============================================================================
// Cache payload fidelity
// =============================================================================

#[test]
fn test_payload_round_trips_unchanged_through_cache() {
    let kv = Rc::new(MemoryStore::new());
    let cache = cache_over(&kv);

    let payload = json!({
        "customer": "A. Painter",
        "items": [
            { "sku": "TNT-0041", "finish": "eggshell", "liters": 10 },
            { "sku": "TNT-0102", "finish": "matte", "liters": 2.5 }
        ],
        "total": 129.90,
        "notes": null
    });

    cache.put("quote_1", &payload);
    assert_eq!(cache.get("quote_1"), Some(payload));

    cache.remove("quote_1");
    assert!(cache.get("quote_1").is_none());
}
