//! Family level calculator
//!
//! Level 1 takes 100 points to complete; every later level N takes
//! `100 + (N - 1) * 150`.

use serde::{Deserialize, Serialize};

use super::AchievementError;

const FIRST_LEVEL_POINTS: i64 = 100;
const POINTS_PER_LEVEL_STEP: i64 = 150;

/// Position of a point total within the level schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: i32,
    pub current_level_points: i64,
    pub points_to_next_level: i64,
}

/// Points needed to complete `level`. Levels below 1 are treated as level 1.
pub fn points_required_for_level(level: i32) -> i64 {
    if level <= 1 {
        FIRST_LEVEL_POINTS
    } else {
        FIRST_LEVEL_POINTS + (i64::from(level) - 1) * POINTS_PER_LEVEL_STEP
    }
}

/// Map a cumulative point total to its level and in-level progress.
pub fn level_from_points(total_points: i64) -> Result<LevelProgress, AchievementError> {
    if total_points < 0 {
        return Err(AchievementError::InvalidInput(format!(
            "total points must be non-negative, got {total_points}"
        )));
    }

    let mut level = 1;
    let mut remaining = total_points;
    loop {
        let required = points_required_for_level(level);
        if remaining < required {
            return Ok(LevelProgress {
                level,
                current_level_points: remaining,
                points_to_next_level: required - remaining,
            });
        }
        remaining -= required;
        level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(level: i32, current: i64, to_next: i64) -> LevelProgress {
        LevelProgress {
            level,
            current_level_points: current,
            points_to_next_level: to_next,
        }
    }

    #[test]
    fn test_zero_points() {
        assert_eq!(level_from_points(0).unwrap(), progress(1, 0, 100));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_from_points(99).unwrap(), progress(1, 99, 1));
        assert_eq!(level_from_points(100).unwrap(), progress(2, 0, 250));
        assert_eq!(level_from_points(349).unwrap(), progress(2, 249, 1));
        // 100 + 250 + 400 = 750 completes level 3
        assert_eq!(level_from_points(350).unwrap(), progress(3, 0, 400));
        assert_eq!(level_from_points(750).unwrap(), progress(4, 0, 550));
    }

    #[test]
    fn test_requirement_schedule() {
        assert_eq!(points_required_for_level(1), 100);
        assert_eq!(points_required_for_level(2), 250);
        assert_eq!(points_required_for_level(10), 1450);
        assert_eq!(points_required_for_level(0), 100);
    }

    #[test]
    fn test_progress_sums_to_level_requirement() {
        for total in (0..20_000).step_by(37) {
            let p = level_from_points(total).unwrap();
            assert!(p.level >= 1);
            assert!(p.current_level_points >= 0);
            assert!(p.points_to_next_level > 0);
            assert_eq!(
                p.current_level_points + p.points_to_next_level,
                points_required_for_level(p.level)
            );
        }
    }

    #[test]
    fn test_level_ten_threshold() {
        let to_reach_ten: i64 = (1..10).map(points_required_for_level).sum();
        assert_eq!(level_from_points(to_reach_ten - 1).unwrap().level, 9);
        assert_eq!(level_from_points(to_reach_ten).unwrap(), progress(10, 0, 1450));
    }

    #[test]
    fn test_negative_points_rejected() {
        assert!(matches!(
            level_from_points(-1),
            Err(AchievementError::InvalidInput(_))
        ));
    }
}
