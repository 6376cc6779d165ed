//! Achievement unlock rules.
//!
//! Each achievement moves one way, Locked → Unlocked, with an explicit
//! administrative reverse transition for correction and testing. Secret
//! achievements are never unlocked directly by gameplay events; they are
//! awarded by [`AchievementEngine::evaluate_secrets`], which integrators
//! must call after every ordinary [`AchievementEngine::unlock`]. The engine
//! deliberately does not chain the two itself, so the unlock primitive
//! stays free of hidden side effects:
//!
//! ```text
//! engine.unlock("first_quote");
//! engine.evaluate_secrets();
//! ```

use chrono::Utc;

use crate::achievements::data::{find_def, CATALOG, SECRET_REQUIREMENTS};
use crate::achievements::store::ProgressStore;
use crate::achievements::types::{baseline_achievements, UserProgress};

pub struct AchievementEngine {
    store: ProgressStore,
}

impl AchievementEngine {
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    /// The underlying store, for read-only UI queries.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Unlock an achievement. Returns true only when the achievement was
    /// newly unlocked; an unknown id or an already-unlocked achievement
    /// returns false with no state change (at-most-once reward).
    pub fn unlock(&self, id: &str) -> bool {
        let Some(def) = find_def(id) else {
            return false;
        };

        let mut achievements = self.store.load_achievements();
        let Some(entry) = achievements.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if entry.unlocked {
            return false;
        }

        let now = Utc::now();
        entry.unlocked = true;
        entry.unlocked_at = Some(now);

        let mut progress = self.store.load_progress();
        progress.achievements.insert(id.to_string());
        progress.total_points += def.points;
        progress.recompute_level();
        progress.last_activity = now;

        self.store.save_achievements(&achievements);
        self.store.save_progress(&progress);
        true
    }

    /// Administrative inverse of [`unlock`](Self::unlock): relocks the
    /// achievement and reverses its points. Returns false if the id is
    /// unknown or the achievement is not currently unlocked.
    pub fn lock(&self, id: &str) -> bool {
        let Some(def) = find_def(id) else {
            return false;
        };

        let mut achievements = self.store.load_achievements();
        let Some(entry) = achievements.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if !entry.unlocked {
            return false;
        }

        entry.unlocked = false;
        entry.unlocked_at = None;

        let mut progress = self.store.load_progress();
        progress.achievements.remove(id);
        // Saturating: a corrupted points total must not underflow
        progress.total_points = progress.total_points.saturating_sub(def.points);
        progress.recompute_level();
        progress.last_activity = Utc::now();

        self.store.save_achievements(&achievements);
        self.store.save_progress(&progress);
        true
    }

    /// Restore every achievement to locked and progress to the zero
    /// baseline. Idempotent.
    pub fn reset_all(&self) {
        self.store.save_achievements(&baseline_achievements());
        self.store.save_progress(&UserProgress::new());
    }

    /// Whether a secret achievement's requirement is currently met: at
    /// least N ordinary achievements unlocked, with N read from
    /// [`SECRET_REQUIREMENTS`]. Ids without a requirement entry are never
    /// eligible. Pure predicate; mutates nothing.
    pub fn check_secret_eligibility(&self, id: &str) -> bool {
        let Some(required) = SECRET_REQUIREMENTS
            .iter()
            .find(|(secret_id, _)| *secret_id == id)
            .map(|(_, required)| *required)
        else {
            return false;
        };
        let unlocked_ordinary = self
            .store
            .load_achievements()
            .iter()
            .filter(|a| a.unlocked && !a.secret)
            .count();
        unlocked_ordinary >= required
    }

    /// Unlock every eligible, still-locked secret achievement. Returns the
    /// newly unlocked ids. This is the only automatic-unlock path; call it
    /// after each ordinary unlock.
    pub fn evaluate_secrets(&self) -> Vec<&'static str> {
        let mut newly_unlocked = Vec::new();
        for def in CATALOG.iter().filter(|def| def.secret) {
            if self.check_secret_eligibility(def.id) && self.unlock(def.id) {
                newly_unlocked.push(def.id);
            }
        }
        newly_unlocked
    }
}
