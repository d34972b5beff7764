//! Unlock planning: drop badges a family already holds and total the points
//! of the rest. Moving the level forward is [`apply_points`], fed with the
//! badges that were actually persisted.

use std::collections::{BTreeSet, HashSet};

use super::AchievementError;
use super::catalog::points_for_badge_ids;
use super::level::level_from_points;
use crate::models::FamilyLevel;

/// Candidate badges a family does not hold yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockPlan {
    /// In id order
    pub new_badge_ids: Vec<&'static str>,
    pub points_earned: i64,
}

pub fn plan_unlocks(candidates: &BTreeSet<&'static str>, held: &HashSet<String>) -> UnlockPlan {
    let new_badge_ids: Vec<&'static str> = candidates
        .iter()
        .copied()
        .filter(|id| !held.contains(*id))
        .collect();
    UnlockPlan {
        points_earned: points_for_badge_ids(&new_badge_ids),
        new_badge_ids,
    }
}

/// Add `points` to a family's level row. Point totals never decrease.
pub fn apply_points(
    level: &FamilyLevel,
    points: i64,
    updated_at: i64,
) -> Result<FamilyLevel, AchievementError> {
    if points < 0 {
        return Err(AchievementError::InvalidInput(format!(
            "points earned must be non-negative, got {points}"
        )));
    }
    let total_points = level
        .total_points
        .checked_add(points)
        .ok_or_else(|| AchievementError::InvalidInput("point total overflow".into()))?;
    let progress = level_from_points(total_points)?;

    Ok(FamilyLevel {
        family_id: level.family_id,
        level: progress.level,
        total_points,
        current_level_points: progress.current_level_points,
        points_to_next_level: progress.points_to_next_level,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_level() -> FamilyLevel {
        FamilyLevel {
            family_id: 1,
            level: 1,
            total_points: 0,
            current_level_points: 0,
            points_to_next_level: 100,
            updated_at: 0,
        }
    }

    #[test]
    fn test_plan_skips_held_badges() {
        let candidates: BTreeSet<&'static str> = ["first_task", "early_bird"].into_iter().collect();
        let held: HashSet<String> = ["first_task".to_string()].into_iter().collect();

        let plan = plan_unlocks(&candidates, &held);

        assert_eq!(plan.new_badge_ids, vec!["early_bird"]);
        assert_eq!(plan.points_earned, 15);
    }

    #[test]
    fn test_plan_with_nothing_new() {
        let candidates: BTreeSet<&'static str> = ["first_task"].into_iter().collect();
        let held: HashSet<String> = ["first_task".to_string()].into_iter().collect();

        let plan = plan_unlocks(&candidates, &held);

        assert!(plan.new_badge_ids.is_empty());
        assert_eq!(plan.points_earned, 0);
    }

    #[test]
    fn test_plan_orders_by_id() {
        let candidates: BTreeSet<&'static str> =
            ["task_master_10", "first_task", "daily_driver"].into_iter().collect();

        let plan = plan_unlocks(&candidates, &HashSet::new());

        assert_eq!(plan.new_badge_ids, vec!["daily_driver", "first_task", "task_master_10"]);
        assert_eq!(plan.points_earned, 85);
    }

    #[test]
    fn test_apply_points_levels_up() {
        let updated = apply_points(&fresh_level(), 110, 42).unwrap();
        assert_eq!(updated.family_id, 1);
        assert_eq!(updated.level, 2);
        assert_eq!(updated.total_points, 110);
        assert_eq!(updated.current_level_points, 10);
        assert_eq!(updated.points_to_next_level, 240);
        assert_eq!(updated.updated_at, 42);
    }

    #[test]
    fn test_apply_points_rejects_negative() {
        assert!(apply_points(&fresh_level(), -1, 0).is_err());
    }
}
