//! Online/offline state tracking with transition fan-out.
//!
//! The monitor owns the current flag and a listener list. The host shell
//! feeds the platform signal in through [`ConnectivityMonitor::set_online`];
//! listeners fire in registration order, and only on actual transitions.
//! No synthetic offline detection happens here: a failed request is not
//! treated as connectivity loss.

use std::cell::{Cell, RefCell};

/// Handle returned by [`ConnectivityMonitor::subscribe`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(usize);

type Listener = Box<dyn FnMut(bool)>;

pub struct ConnectivityMonitor {
    online: Cell<bool>,
    listeners: RefCell<Vec<Option<Listener>>>,
}

impl ConnectivityMonitor {
    /// Creates a monitor with an initial state reported by the platform.
    pub fn new(online: bool) -> Self {
        Self {
            online: Cell::new(online),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Point-in-time connectivity query.
    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// Register a transition listener. The listener receives the new state
    /// on every online/offline flip. A listener must not unsubscribe itself
    /// from within its own callback.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: FnMut(bool) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(Some(Box::new(listener)));
        SubscriptionHandle(listeners.len() - 1)
    }

    /// Detach a listener. Unknown or already-detached handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(slot) = listeners.get_mut(handle.0) {
            *slot = None;
        }
    }

    /// Ingest the platform-reported state. Fires listeners only when the
    /// state actually changed.
    pub fn set_online(&self, online: bool) {
        if self.online.replace(online) == online {
            return;
        }
        // Each listener is taken out of its slot for the duration of its
        // call so a callback may subscribe new listeners without holding a
        // second borrow.
        let count = self.listeners.borrow().len();
        for index in 0..count {
            let slot = self.listeners.borrow_mut()[index].take();
            if let Some(mut listener) = slot {
                listener(online);
                self.listeners.borrow_mut()[index] = Some(listener);
            }
        }
    }
}
