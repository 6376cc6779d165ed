//! Achievement system runtime types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::data::{AchievementDef, CATALOG};
use crate::constants::level_for_points;

/// An achievement as presented to the UI: catalog metadata plus the mutable
/// unlock state.
///
/// Invariant: `unlocked_at` is `Some` if and only if `unlocked` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub points: u32,
    pub secret: bool,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Locked baseline built from a catalog definition.
    pub fn from_def(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            points: def.points,
            secret: def.secret,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// The full catalog in its locked baseline state.
pub fn baseline_achievements() -> Vec<Achievement> {
    CATALOG.iter().map(Achievement::from_def).collect()
}

/// Per-user progress singleton.
///
/// Invariant: `achievements` equals the set of unlocked achievement ids,
/// `total_points` is the sum of their point values, and `level` is always
/// recomputed from `total_points`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: u32,
    pub level: u32,
    pub achievements: BTreeSet<String>,
    pub last_activity: DateTime<Utc>,
}

impl UserProgress {
    /// Zero baseline: no points, level 1, nothing unlocked.
    pub fn new() -> Self {
        Self {
            total_points: 0,
            level: level_for_points(0),
            achievements: BTreeSet::new(),
            last_activity: Utc::now(),
        }
    }

    /// Re-derive `level` from `total_points`.
    pub fn recompute_level(&mut self) {
        self.level = level_for_points(self.total_points);
    }

    /// Number of unlocked achievements.
    pub fn unlocked_count(&self) -> usize {
        self.achievements.len()
    }

    /// Unlock percentage across the catalog (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        if CATALOG.is_empty() {
            return 0.0;
        }
        (self.unlocked_count() as f32 / CATALOG.len() as f32) * 100.0
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_def_is_locked() {
        let achievement = Achievement::from_def(&CATALOG[0]);
        assert!(!achievement.unlocked);
        assert!(achievement.unlocked_at.is_none());
        assert_eq!(achievement.id, CATALOG[0].id);
        assert_eq!(achievement.points, CATALOG[0].points);
    }

    #[test]
    fn test_baseline_covers_catalog() {
        let baseline = baseline_achievements();
        assert_eq!(baseline.len(), CATALOG.len());
        assert!(baseline.iter().all(|a| !a.unlocked));
    }

    #[test]
    fn test_new_progress_is_zero_baseline() {
        let progress = UserProgress::new();
        assert_eq!(progress.total_points, 0);
        assert_eq!(progress.level, 1);
        assert!(progress.achievements.is_empty());
    }

    #[test]
    fn test_recompute_level() {
        let mut progress = UserProgress::new();
        progress.total_points = 230;
        progress.recompute_level();
        assert_eq!(progress.level, 3);
    }

    #[test]
    fn test_unlock_percentage() {
        let mut progress = UserProgress::new();
        progress.achievements.insert("first_quote".to_string());
        progress.achievements.insert("first_order".to_string());
        progress.achievements.insert("eco_painter".to_string());
        assert_eq!(progress.unlocked_count(), 3);
        assert!((progress.unlock_percentage() - 25.0).abs() < f32::EPSILON);
    }
}
