//! Achievement system module.
//!
//! Tracks storefront gamification progress: a fixed catalog of achievements,
//! the per-user points/level singleton, and the engine that applies unlock
//! rules. All mutable state lives behind [`store::ProgressStore`], which is
//! injected into [`engine::AchievementEngine`] so tests can substitute an
//! in-memory store.

pub mod data;
pub mod engine;
pub mod store;
pub mod types;

pub use data::{find_def, AchievementDef, CATALOG, SECRET_REQUIREMENTS};
pub use engine::AchievementEngine;
pub use store::ProgressStore;
pub use types::{Achievement, UserProgress};
