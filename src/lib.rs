//! Tint — client-side progress & offline-cache engine for the Tint paint
//! storefront.
//!
//! Two subsystems share one persistent key-value layer:
//!
//! - **Achievements**: a fixed catalog, a per-user points/level singleton,
//!   and an engine applying unlock rules (including secret achievements
//!   derived from other unlocks). See [`achievements`].
//! - **Offline cache & sync**: quotes and room simulations captured while
//!   the network is down, drained to the remote persistence services when
//!   connectivity returns. See [`offline`].
//!
//! The engine is single-threaded and event-driven. Storage faults are
//! recovered locally (the engine keeps working without persistence for the
//! session); only caller misuse is reported back as a failed operation.

pub mod achievements;
pub mod connectivity;
pub mod constants;
pub mod offline;
pub mod storage;

pub use achievements::{Achievement, AchievementEngine, ProgressStore, UserProgress};
pub use connectivity::{ConnectivityMonitor, SubscriptionHandle};
pub use offline::{HttpRemote, OfflineCache, OfflineRecord, RemoteSink, SyncCoordinator, SyncReport, SyncRoute};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
