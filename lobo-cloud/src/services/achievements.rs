//! Achievement check orchestration
//!
//! 1. Register the acting member and mark them active
//! 2. Lock the family level row (serializes checks per family)
//! 3. Load counters and the snapshot from the previous check
//! 4. Run the checkers relevant to the action
//! 5. Insert new unlocks, apply their points, re-check level milestones
//! 6. Persist level and snapshot, commit

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use shared::achievement::{
    CountChange, apply_points, check_collaboration_badges, check_milestone_badges,
    check_task_completion_badges, find_badge, plan_unlocks, points_for_badge_ids,
};
use shared::models::{
    AchievementCheckContext, AchievementCheckResult, ActionType, FamilyAchievement, Metric,
    UnlockedAchievement,
};
use sqlx::PgPool;

use crate::db::counters::{self, ActivityCounts, FAMILY_SUBJECT, Snapshot};
use crate::db::{achievements, levels, members};
use crate::error::ServiceResult;

const STREAK_DAYS: &str = "streak_days";
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Family-wide settings the checks depend on
#[derive(Debug, Clone, Copy)]
pub struct CheckSettings {
    /// Offset for local hours and streak days when the event carries none
    pub family_offset: FixedOffset,
    pub active_window_days: u32,
}

/// Run an achievement check for one event and persist the result.
///
/// Re-running the same event against unchanged counters unlocks nothing.
pub async fn check_achievements(
    pool: &PgPool,
    context: &AchievementCheckContext,
    settings: CheckSettings,
) -> ServiceResult<AchievementCheckResult> {
    let family_id = context.family_id;
    let user_id = context.user_id;
    let now = context.timestamp.timestamp_millis();

    members::touch(pool, family_id, user_id, now).await?;

    let participation = if context.action == ActionType::TaskCompleted {
        let window = i64::from(settings.active_window_days) * MILLIS_PER_DAY;
        Some(members::participation(pool, family_id, now - window).await?)
    } else {
        None
    };

    let mut tx = pool.begin().await?;
    let mut level = levels::lock(&mut *tx, family_id, now).await?;

    let counts = counters::activity_counts(&mut *tx, family_id, user_id).await?;
    let snapshot =
        counters::load_snapshot(&mut *tx, family_id, &[FAMILY_SUBJECT, user_id]).await?;
    let mut observed = Observed::new(&snapshot);

    let mut candidates = match context.action {
        ActionType::TaskCompleted => {
            let local_time = local_event_time(context, settings.family_offset);
            let offset_millis = i64::from(local_time.offset().local_minus_utc()) * 1000;
            let days =
                counters::completion_days(&mut *tx, family_id, user_id, offset_millis).await?;
            let today = counters::day_index(now, offset_millis);

            let completed = observed.change(
                user_id,
                Metric::CompletedTasks.as_str(),
                counts.member_completed_tasks,
            );
            let streak_days = i64::from(current_streak(&days, today));
            let streak = observed.change(user_id, STREAK_DAYS, streak_days);
            let family_completed = observed.change(
                FAMILY_SUBJECT,
                Metric::FamilyCompletedTasks.as_str(),
                counts.family_completed_tasks,
            );
            let (active, total) = participation.unwrap_or_default();

            let mut ids = check_task_completion_badges(context, completed, streak, local_time);
            ids.extend(check_collaboration_badges(
                context,
                family_completed,
                clamp(active),
                clamp(total),
            ));
            ids
        }
        ActionType::ListCreated | ActionType::ListCompleted | ActionType::BudgetTransaction => {
            let lists = observed.change(FAMILY_SUBJECT, Metric::Lists.as_str(), counts.lists);
            let completed_lists = observed.change(
                FAMILY_SUBJECT,
                Metric::CompletedLists.as_str(),
                counts.completed_lists,
            );
            let budget = if context.action == ActionType::BudgetTransaction {
                observed.change(
                    FAMILY_SUBJECT,
                    Metric::BudgetTransactions.as_str(),
                    counts.budget_transactions,
                )
            } else {
                CountChange::unchanged(clamp(counts.budget_transactions))
            };
            let family_level = CountChange::unchanged(clamp(i64::from(level.level)));
            check_milestone_badges(context, lists, completed_lists, budget, family_level)
        }
        ActionType::TaskCreated | ActionType::ChatMessage => BTreeSet::new(),
    };

    let mut held = achievements::held_badge_ids(&mut *tx, family_id).await?;
    let mut unlocked: Vec<FamilyAchievement> = Vec::new();
    let mut points_earned = 0;

    loop {
        let plan = plan_unlocks(&candidates, &held);
        if plan.new_badge_ids.is_empty() {
            break;
        }

        let mut inserted_ids = Vec::with_capacity(plan.new_badge_ids.len());
        for badge_id in plan.new_badge_ids {
            held.insert(badge_id.to_string());
            let row = achievements::insert(
                &mut *tx,
                family_id,
                badge_id,
                user_id,
                now,
                context.data.as_ref(),
            )
            .await?;
            if let Some(row) = row {
                tracing::info!(family_id, user_id, badge_id, "Achievement unlocked");
                inserted_ids.push(badge_id);
                unlocked.push(row);
            }
        }

        let earned = points_for_badge_ids(&inserted_ids);
        let previous_level = level.level;
        level = apply_points(&level, earned, now)?;
        points_earned += earned;

        if level.level == previous_level {
            break;
        }
        tracing::info!(
            family_id,
            from = previous_level,
            to = level.level,
            "Family leveled up"
        );
        candidates = level_milestones(context, &counts, previous_level, level.level);
    }

    if points_earned > 0 {
        levels::save(&mut *tx, &level).await?;
    }
    counters::save_snapshot(&mut *tx, family_id, &observed.values, now).await?;
    tx.commit().await?;

    tracing::debug!(
        family_id,
        user_id,
        action = %context.action,
        new_badges = unlocked.len(),
        points_earned,
        "Achievement check finished"
    );

    let new_achievements: Vec<UnlockedAchievement> =
        unlocked.into_iter().map(into_unlocked).collect();
    Ok(AchievementCheckResult {
        total_new_badges: new_achievements.len(),
        new_achievements,
        points_earned,
        family_level: level,
    })
}

/// Join a stored unlock with its catalog entry.
pub fn into_unlocked(row: FamilyAchievement) -> UnlockedAchievement {
    let badge = find_badge(&row.badge_id).cloned();
    if badge.is_none() {
        tracing::warn!(badge_id = %row.badge_id, "Stored badge is not in the catalog");
    }
    UnlockedAchievement {
        badge_id: row.badge_id,
        unlocked_by: row.unlocked_by,
        unlocked_at: row.unlocked_at,
        metadata: row.metadata,
        badge,
    }
}

/// Milestones a level change can unlock. Other counters are unchanged by it.
fn level_milestones(
    context: &AchievementCheckContext,
    counts: &ActivityCounts,
    from_level: i32,
    to_level: i32,
) -> BTreeSet<&'static str> {
    check_milestone_badges(
        context,
        CountChange::unchanged(clamp(counts.lists)),
        CountChange::unchanged(clamp(counts.completed_lists)),
        CountChange::unchanged(clamp(counts.budget_transactions)),
        CountChange::new(clamp(i64::from(from_level)), clamp(i64::from(to_level))),
    )
}

/// Local time of the event: `data.completedAt` when it carries an offset,
/// otherwise the event timestamp in the family offset.
fn local_event_time(
    context: &AchievementCheckContext,
    family_offset: FixedOffset,
) -> DateTime<FixedOffset> {
    context
        .data
        .as_ref()
        .and_then(|d| d.get("completedAt"))
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .unwrap_or_else(|| context.timestamp.with_timezone(&family_offset))
}

/// Consecutive days with a completion, ending today (or yesterday when
/// nothing is completed yet today). `days` is sorted most recent first.
pub fn current_streak(days: &[i64], today: i64) -> u32 {
    let Some(&latest) = days.first() else {
        return 0;
    };
    if latest != today && latest != today - 1 {
        return 0;
    }

    let mut streak = 1;
    let mut expected = latest - 1;
    for &day in &days[1..] {
        if day == expected {
            streak += 1;
            expected -= 1;
        } else if day < expected {
            break;
        }
    }
    streak
}

fn clamp(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Counter values read during a check, diffed against the previous snapshot
struct Observed<'a> {
    snapshot: &'a Snapshot,
    values: Vec<(i64, &'static str, i64)>,
}

impl<'a> Observed<'a> {
    fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            values: Vec::new(),
        }
    }

    fn change(&mut self, subject: i64, key: &'static str, current: i64) -> CountChange {
        let previous = self
            .snapshot
            .get(&(subject, key.to_string()))
            .copied()
            .unwrap_or(0);
        self.values.push((subject, key, current));
        CountChange::new(clamp(previous), clamp(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Utc};
    use std::collections::HashMap;

    fn ctx(data: Option<serde_json::Value>) -> AchievementCheckContext {
        AchievementCheckContext {
            family_id: 1,
            user_id: 2,
            action: ActionType::TaskCompleted,
            data,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 23, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        assert_eq!(current_streak(&[100, 99, 98, 97], 100), 4);
        assert_eq!(current_streak(&[100, 99, 97, 96], 100), 2);
    }

    #[test]
    fn test_streak_may_end_yesterday() {
        assert_eq!(current_streak(&[99, 98], 100), 2);
        assert_eq!(current_streak(&[98, 97], 100), 0);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(current_streak(&[], 100), 0);
        assert_eq!(current_streak(&[100], 100), 1);
    }

    #[test]
    fn test_local_time_prefers_event_offset() {
        let c = ctx(Some(serde_json::json!({ "completedAt": "2025-03-15T07:30:00+08:00" })));
        let local = local_event_time(&c, FixedOffset::east_opt(0).unwrap());
        assert_eq!(local.hour(), 7);
        assert_eq!(local.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_local_time_falls_back_to_family_offset() {
        let c = ctx(None);
        let local = local_event_time(&c, FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(local.hour(), 18);

        let c = ctx(Some(serde_json::json!({ "completedAt": "not a date" })));
        assert_eq!(local_event_time(&c, FixedOffset::east_opt(0).unwrap()).hour(), 23);
    }

    #[test]
    fn test_observed_diffs_against_snapshot() {
        let mut snapshot: Snapshot = HashMap::new();
        snapshot.insert((2, "completed_tasks".to_string()), 9);
        let mut observed = Observed::new(&snapshot);

        assert_eq!(observed.change(2, "completed_tasks", 10), CountChange::new(9, 10));
        assert_eq!(observed.change(0, "lists", 3), CountChange::new(0, 3));
        assert_eq!(
            observed.values,
            vec![(2, "completed_tasks", 10), (0, "lists", 3)]
        );
    }

    #[test]
    fn test_level_milestone_only_on_crossing_ten() {
        let c = ctx(None);
        let counts = ActivityCounts::default();
        assert_eq!(
            level_milestones(&c, &counts, 9, 10).into_iter().collect::<Vec<_>>(),
            vec!["family_milestone"]
        );
        assert!(level_milestones(&c, &counts, 3, 4).is_empty());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-3), 0);
        assert_eq!(clamp(42), 42);
        assert_eq!(clamp(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_into_unlocked_joins_catalog() {
        let row = FamilyAchievement {
            id: 1,
            family_id: 1,
            badge_id: "first_task".into(),
            unlocked_by: 2,
            unlocked_at: 0,
            metadata: None,
        };
        let unlocked = into_unlocked(row);
        assert_eq!(unlocked.badge.map(|b| b.points), Some(10));

        let row = FamilyAchievement {
            id: 2,
            family_id: 1,
            badge_id: "retired_badge".into(),
            unlocked_by: 2,
            unlocked_at: 0,
            metadata: None,
        };
        assert!(into_unlocked(row).badge.is_none());
    }
}
