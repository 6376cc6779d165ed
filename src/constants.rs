// Persisted key layout
pub const PROGRESS_NAMESPACE: &str = "progress";
pub const OFFLINE_NAMESPACE: &str = "offline";
pub const ACHIEVEMENTS_KEY: &str = "achievements";
pub const USER_PROGRESS_KEY: &str = "user_progress";

// Envelope format version written with every stored value
pub const ENVELOPE_VERSION: &str = "1";

// Level progression constants
pub const POINTS_PER_LEVEL: u32 = 100;

/// Level derived from total points. This is the only level formula; `level`
/// is never stored independently of the points it was computed from.
pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}
