//! Badge catalog
//!
//! The full set of badges a family can earn. Adding a badge is a code change;
//! there is no runtime API to mutate the catalog.

use std::collections::HashSet;

use crate::models::{
    AchievementProgress, Badge, BadgeCategory, Condition, Metric, Rarity, Requirement, Timeframe,
};

static BADGES: [Badge; 15] = [
    // ── Tasks ──
    Badge {
        id: "first_task",
        name: "First Steps",
        description: "Complete your first task",
        icon: "🎯",
        category: BadgeCategory::Tasks,
        points: 10,
        requirements: Requirement::Count {
            metric: Metric::CompletedTasks,
            target: 1,
        },
        rarity: Rarity::Common,
    },
    Badge {
        id: "task_master_10",
        name: "Task Master",
        description: "Complete 10 tasks",
        icon: "⭐",
        category: BadgeCategory::Tasks,
        points: 25,
        requirements: Requirement::Count {
            metric: Metric::CompletedTasks,
            target: 10,
        },
        rarity: Rarity::Common,
    },
    Badge {
        id: "task_champion_50",
        name: "Task Champion",
        description: "Complete 50 tasks",
        icon: "🏆",
        category: BadgeCategory::Tasks,
        points: 75,
        requirements: Requirement::Count {
            metric: Metric::CompletedTasks,
            target: 50,
        },
        rarity: Rarity::Rare,
    },
    Badge {
        id: "task_legend_100",
        name: "Task Legend",
        description: "Complete 100 tasks",
        icon: "👑",
        category: BadgeCategory::Tasks,
        points: 150,
        requirements: Requirement::Count {
            metric: Metric::CompletedTasks,
            target: 100,
        },
        rarity: Rarity::Epic,
    },
    // ── Consistency ──
    Badge {
        id: "daily_driver",
        name: "Daily Driver",
        description: "Complete tasks 7 days in a row",
        icon: "🔥",
        category: BadgeCategory::Consistency,
        points: 50,
        requirements: Requirement::Streak {
            target: 7,
            timeframe: Some(Timeframe::Day),
        },
        rarity: Rarity::Rare,
    },
    Badge {
        id: "weekly_warrior",
        name: "Weekly Warrior",
        description: "Complete tasks 30 days in a row",
        icon: "⚡",
        category: BadgeCategory::Consistency,
        points: 200,
        requirements: Requirement::Streak {
            target: 30,
            timeframe: Some(Timeframe::Day),
        },
        rarity: Rarity::Epic,
    },
    // ── Special ──
    Badge {
        id: "early_bird",
        name: "Early Bird",
        description: "Complete a task before 8 AM",
        icon: "🌅",
        category: BadgeCategory::Special,
        points: 15,
        requirements: Requirement::Special {
            target: 1,
            condition: Condition::EarlyCompletion,
        },
        rarity: Rarity::Common,
    },
    Badge {
        id: "night_owl",
        name: "Night Owl",
        description: "Complete a task after 10 PM",
        icon: "🦉",
        category: BadgeCategory::Special,
        points: 15,
        requirements: Requirement::Special {
            target: 1,
            condition: Condition::LateCompletion,
        },
        rarity: Rarity::Common,
    },
    // ── Collaboration ──
    Badge {
        id: "family_harmony",
        name: "Family Harmony",
        description: "Complete 20 tasks together as a family",
        icon: "🤝",
        category: BadgeCategory::Collaboration,
        points: 50,
        requirements: Requirement::Count {
            metric: Metric::FamilyCompletedTasks,
            target: 20,
        },
        rarity: Rarity::Rare,
    },
    Badge {
        id: "team_player",
        name: "Team Player",
        description: "Every family member was active this week",
        icon: "👨‍👩‍👧‍👦",
        category: BadgeCategory::Collaboration,
        points: 40,
        requirements: Requirement::Percentage {
            target: 100,
            timeframe: Some(Timeframe::Week),
        },
        rarity: Rarity::Rare,
    },
    // ── Milestones ──
    Badge {
        id: "list_creator",
        name: "List Creator",
        description: "Create your first shopping list",
        icon: "📝",
        category: BadgeCategory::Milestones,
        points: 10,
        requirements: Requirement::Special {
            target: 1,
            condition: Condition::CreateList,
        },
        rarity: Rarity::Common,
    },
    Badge {
        id: "organized_shopper",
        name: "Organized Shopper",
        description: "Complete 10 shopping lists",
        icon: "🛒",
        category: BadgeCategory::Milestones,
        points: 60,
        requirements: Requirement::Count {
            metric: Metric::CompletedLists,
            target: 10,
        },
        rarity: Rarity::Rare,
    },
    Badge {
        id: "budget_tracker",
        name: "Budget Tracker",
        description: "Record your first budget transaction",
        icon: "💰",
        category: BadgeCategory::Milestones,
        points: 10,
        requirements: Requirement::Special {
            target: 1,
            condition: Condition::FirstBudgetEntry,
        },
        rarity: Rarity::Common,
    },
    Badge {
        id: "financial_guru",
        name: "Financial Guru",
        description: "Record 100 budget transactions",
        icon: "📊",
        category: BadgeCategory::Milestones,
        points: 150,
        requirements: Requirement::Count {
            metric: Metric::BudgetTransactions,
            target: 100,
        },
        rarity: Rarity::Epic,
    },
    Badge {
        id: "family_milestone",
        name: "Family Milestone",
        description: "Reach family level 10",
        icon: "🎉",
        category: BadgeCategory::Milestones,
        points: 500,
        requirements: Requirement::Count {
            metric: Metric::FamilyLevel,
            target: 10,
        },
        rarity: Rarity::Legendary,
    },
];

/// Full catalog in presentation order.
pub fn all_badges() -> &'static [Badge] {
    &BADGES
}

pub fn badges_by_category(category: BadgeCategory) -> Vec<&'static Badge> {
    BADGES.iter().filter(|b| b.category == category).collect()
}

pub fn badges_by_rarity(rarity: Rarity) -> Vec<&'static Badge> {
    BADGES.iter().filter(|b| b.rarity == rarity).collect()
}

pub fn find_badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

/// Sum of points for the given badge ids.
///
/// Unknown ids contribute zero and each known id counts once, however often
/// it appears in `ids`.
pub fn points_for_badge_ids<I, S>(ids: I) -> i64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_owned()).collect();
    BADGES
        .iter()
        .filter(|b| ids.contains(b.id))
        .map(|b| b.points)
        .sum()
}

/// Unlock progress given how many catalog badges a family holds.
pub fn achievement_progress(unlocked: usize) -> AchievementProgress {
    let total = BADGES.len();
    let unlocked = unlocked.min(total);
    let percent = if total == 0 {
        0.0
    } else {
        (unlocked as f64 / total as f64 * 1000.0).round() / 10.0
    };
    AchievementProgress {
        unlocked,
        total,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all_badges().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), all_badges().len());
    }

    #[test]
    fn test_points_are_positive() {
        assert!(all_badges().iter().all(|b| b.points > 0));
    }

    #[test]
    fn test_catalog_order_starts_with_task_badges() {
        let ids: Vec<&str> = all_badges().iter().take(4).map(|b| b.id).collect();
        assert_eq!(
            ids,
            ["first_task", "task_master_10", "task_champion_50", "task_legend_100"]
        );
    }

    #[test]
    fn test_badges_by_category() {
        let collaboration: Vec<&str> = badges_by_category(BadgeCategory::Collaboration)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(collaboration, ["family_harmony", "team_player"]);

        let milestones = badges_by_category(BadgeCategory::Milestones);
        assert_eq!(milestones.len(), 5);
        assert!(
            milestones
                .iter()
                .all(|b| b.category == BadgeCategory::Milestones)
        );
    }

    #[test]
    fn test_badges_by_rarity() {
        let legendary = badges_by_rarity(Rarity::Legendary);
        assert_eq!(legendary.len(), 1);
        assert_eq!(legendary[0].id, "family_milestone");

        let total: usize = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
            .into_iter()
            .map(|r| badges_by_rarity(r).len())
            .sum();
        assert_eq!(total, all_badges().len());
    }

    #[test]
    fn test_find_badge() {
        assert_eq!(find_badge("night_owl").map(|b| b.points), Some(15));
        assert!(find_badge("does_not_exist").is_none());
    }

    #[test]
    fn test_points_ignore_unknown_ids() {
        let first_task = find_badge("first_task").unwrap().points;
        assert_eq!(points_for_badge_ids(["first_task", "unknown_id"]), first_task);
    }

    #[test]
    fn test_points_count_each_badge_once() {
        assert_eq!(points_for_badge_ids(["first_task", "first_task"]), 10);
        assert_eq!(points_for_badge_ids(["early_bird", "night_owl"]), 30);
        assert_eq!(points_for_badge_ids(Vec::<String>::new()), 0);
    }

    #[test]
    fn test_achievement_progress() {
        let progress = achievement_progress(3);
        assert_eq!(progress.unlocked, 3);
        assert_eq!(progress.total, 15);
        assert_eq!(progress.percent, 20.0);

        assert_eq!(achievement_progress(0).percent, 0.0);
        assert_eq!(achievement_progress(99).unlocked, 15);
    }

    #[test]
    fn test_requirement_serializes_with_type_tag() {
        let json = serde_json::to_value(find_badge("task_master_10").unwrap()).unwrap();
        assert_eq!(json["requirements"]["type"], "count");
        assert_eq!(json["requirements"]["metric"], "completed_tasks");
        assert_eq!(json["requirements"]["target"], 10);
        assert_eq!(json["category"], "tasks");
        assert_eq!(json["rarity"], "common");

        let json = serde_json::to_value(find_badge("list_creator").unwrap()).unwrap();
        assert_eq!(json["requirements"]["type"], "special");
        assert_eq!(json["requirements"]["condition"], "create_list");
    }
}
