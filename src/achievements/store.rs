//! Achievement and progress persistence.
//!
//! Two keys in the progress namespace: the achievement unlock-state
//! collection and the `UserProgress` singleton. Both follow the same
//! contract: load-or-initialize (first load persists the baseline),
//! whole-replace saves, and fallback to the baseline when storage is
//! unavailable or a stored value fails to parse.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::achievements::data::CATALOG;
use crate::achievements::types::{baseline_achievements, Achievement, UserProgress};
use crate::constants::{ACHIEVEMENTS_KEY, PROGRESS_NAMESPACE, USER_PROGRESS_KEY};
use crate::storage::envelope;
use crate::storage::kv::KeyValueStore;

/// Persisted per-achievement unlock state. Catalog metadata is merged back
/// in on load, so copy or icon changes apply retroactively.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnlockState {
    id: String,
    unlocked: bool,
    unlocked_at: Option<DateTime<Utc>>,
}

pub struct ProgressStore {
    kv: Rc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The catalog merged with persisted unlock state. If nothing valid is
    /// persisted, initializes storage to the all-locked baseline and
    /// returns it; repeat calls are idempotent.
    pub fn load_achievements(&self) -> Vec<Achievement> {
        if let Some(envelope) = envelope::read(self.kv.as_ref(), PROGRESS_NAMESPACE, ACHIEVEMENTS_KEY)
        {
            if let Some(states) = envelope.open::<Vec<UnlockState>>() {
                return merge_with_catalog(states);
            }
            warn!("achievement collection failed to parse, reinitializing to baseline");
        }
        let baseline = baseline_achievements();
        self.save_achievements(&baseline);
        baseline
    }

    /// Replaces the persisted unlock-state collection wholesale. Callers
    /// must pass the complete set; partial updates are not supported.
    pub fn save_achievements(&self, achievements: &[Achievement]) -> bool {
        let states: Vec<UnlockState> = achievements
            .iter()
            .map(|a| UnlockState {
                id: a.id.clone(),
                unlocked: a.unlocked,
                unlocked_at: if a.unlocked { a.unlocked_at } else { None },
            })
            .collect();
        envelope::write(self.kv.as_ref(), PROGRESS_NAMESPACE, ACHIEVEMENTS_KEY, &states)
    }

    /// The progress singleton, initialized to the zero baseline on first
    /// load or after corruption.
    pub fn load_progress(&self) -> UserProgress {
        if let Some(envelope) = envelope::read(self.kv.as_ref(), PROGRESS_NAMESPACE, USER_PROGRESS_KEY)
        {
            if let Some(progress) = envelope.open::<UserProgress>() {
                return progress;
            }
            warn!("user progress failed to parse, reinitializing to baseline");
        }
        let baseline = UserProgress::new();
        self.save_progress(&baseline);
        baseline
    }

    /// Replaces the persisted progress singleton wholesale.
    pub fn save_progress(&self, progress: &UserProgress) -> bool {
        envelope::write(self.kv.as_ref(), PROGRESS_NAMESPACE, USER_PROGRESS_KEY, progress)
    }
}

/// Catalog metadata wins; only unlock state is carried from storage.
/// Persisted ids no longer in the catalog are dropped, and catalog entries
/// with no persisted state come back locked.
fn merge_with_catalog(states: Vec<UnlockState>) -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|def| {
            let mut achievement = Achievement::from_def(def);
            if let Some(state) = states.iter().find(|s| s.id == def.id) {
                achievement.unlocked = state.unlocked;
                achievement.unlocked_at = if state.unlocked { state.unlocked_at } else { None };
            }
            achievement
        })
        .collect()
}
