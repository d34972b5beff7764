//! Family achievement engine
//!
//! Pure functions only: the badge catalog is compiled-in data, and every
//! checker takes the counters it needs as arguments. Nothing here performs
//! I/O or keeps state, so callers may invoke it concurrently from any number
//! of requests.
//!
//! - [`catalog`]: the static badge list and read-only queries over it
//! - [`level`]: cumulative points → level / progress
//! - [`checker`]: per-action rules returning the badge ids an event unlocks
//! - [`plan`]: de-duplication against held badges and point application

pub mod catalog;
pub mod checker;
pub mod level;
pub mod plan;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{
    achievement_progress, all_badges, badges_by_category, badges_by_rarity, find_badge,
    points_for_badge_ids,
};
pub use checker::{check_collaboration_badges, check_milestone_badges, check_task_completion_badges};
pub use level::{LevelProgress, level_from_points, points_required_for_level};
pub use plan::{UnlockPlan, apply_points, plan_unlocks};

/// Achievement engine error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AchievementError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Value of a counter before and after one event.
///
/// Thresholds are satisfied by *crossing* them (`previous < target <= current`),
/// so a batch update that jumps from 9 to 11 still unlocks a target of 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountChange {
    pub previous: u32,
    pub current: u32,
}

impl CountChange {
    pub const fn new(previous: u32, current: u32) -> Self {
        Self { previous, current }
    }

    /// A counter the event did not touch.
    pub const fn unchanged(value: u32) -> Self {
        Self::new(value, value)
    }

    /// Whether this change crosses `target`.
    pub const fn crossed(&self, target: u32) -> bool {
        self.previous < target && target <= self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossed_exact_step() {
        assert!(CountChange::new(9, 10).crossed(10));
        assert!(!CountChange::new(10, 11).crossed(10));
    }

    #[test]
    fn test_crossed_batch_jump() {
        assert!(CountChange::new(9, 11).crossed(10));
        assert!(CountChange::new(0, 60).crossed(1));
        assert!(CountChange::new(0, 60).crossed(50));
        assert!(!CountChange::new(0, 60).crossed(100));
    }

    #[test]
    fn test_unchanged_never_crosses() {
        for value in [0, 1, 10, 100] {
            assert!(!CountChange::unchanged(value).crossed(value));
        }
    }

    #[test]
    fn test_decrease_never_crosses() {
        assert!(!CountChange::new(11, 9).crossed(10));
    }
}
