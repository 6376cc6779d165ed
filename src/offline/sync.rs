//! Connectivity-driven cache reconciliation.
//!
//! When the monitor reports a transition to online, the coordinator drains
//! the offline cache: each entry is routed to a remote sink by key prefix,
//! removed on success, and retained for the next pass on failure. Draining
//! is strictly sequential and best-effort, at-least-once; the remote
//! `create` must be idempotent per key.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::connectivity::{ConnectivityMonitor, SubscriptionHandle};
use crate::offline::cache::OfflineCache;
use crate::offline::remote::RemoteSink;

/// Maps a key prefix (`quote_`, `simulation_`) to the sink that persists
/// records of that kind. First matching route wins.
pub struct SyncRoute {
    pub prefix: String,
    pub sink: Rc<dyn RemoteSink>,
}

impl SyncRoute {
    pub fn new(prefix: impl Into<String>, sink: Rc<dyn RemoteSink>) -> Self {
        Self {
            prefix: prefix.into(),
            sink,
        }
    }
}

/// Outcome of one drain pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Keys persisted remotely and removed from the cache.
    pub synced: Vec<String>,
    /// Keys left in place: sink failure or no matching route.
    pub retained: Vec<String>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.synced.is_empty() && self.retained.is_empty()
    }
}

pub struct SyncCoordinator {
    cache: OfflineCache,
    routes: Vec<SyncRoute>,
    in_flight: Cell<bool>,
}

impl SyncCoordinator {
    pub fn new(cache: OfflineCache, routes: Vec<SyncRoute>) -> Self {
        Self {
            cache,
            routes,
            in_flight: Cell::new(false),
        }
    }

    /// Subscribe to the monitor so every offline→online transition runs a
    /// drain pass. Returns the subscription handle for detaching.
    pub fn start(self: Rc<Self>, monitor: &ConnectivityMonitor) -> SubscriptionHandle {
        monitor.subscribe(move |online| {
            if online {
                self.sync_once();
            }
        })
    }

    /// Drain the cache once, sequentially, in enumeration order. A call
    /// made while a drain is already in flight returns an empty report
    /// without touching the cache, so the same entries are never drained
    /// twice concurrently.
    pub fn sync_once(&self) -> SyncReport {
        let mut report = SyncReport::default();
        if self.in_flight.replace(true) {
            return report;
        }

        for key in self.cache.keys() {
            let Some(payload) = self.cache.get(&key) else {
                continue;
            };
            let Some(route) = self.routes.iter().find(|r| key.starts_with(&r.prefix)) else {
                debug!(%key, "no sync route for cached entry, retaining");
                report.retained.push(key);
                continue;
            };
            match route.sink.create(&key, &payload) {
                Ok(id) => {
                    debug!(%key, %id, "synced offline entry");
                    self.cache.remove(&key);
                    report.synced.push(key);
                }
                Err(err) => {
                    debug!(%key, error = %err, "sync failed, retaining entry");
                    report.retained.push(key);
                }
            }
        }

        self.in_flight.set(false);
        report
    }
}
