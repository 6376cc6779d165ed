//! Offline record cache and reconciliation.
//!
//! Domain records (quotes, room simulations) captured while the network is
//! down are held in [`cache::OfflineCache`] and drained to the remote
//! persistence services by [`sync::SyncCoordinator`] when connectivity
//! returns.

pub mod cache;
pub mod remote;
pub mod sync;

pub use cache::{OfflineCache, OfflineRecord};
pub use remote::{HttpRemote, RemoteSink};
pub use sync::{SyncCoordinator, SyncReport, SyncRoute};
