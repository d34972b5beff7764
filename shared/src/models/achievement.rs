//! Achievement, Badge & Family Level Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::achievement::AchievementError;

/// Badge category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Tasks,
    Collaboration,
    Milestones,
    Consistency,
    Special,
}

/// Badge rarity (display only, never affects scoring)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Counter a `count` requirement is measured against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Tasks completed by the acting member
    CompletedTasks,
    /// Tasks completed by anyone in the family
    FamilyCompletedTasks,
    /// Shopping lists created by the family
    Lists,
    /// Shopping lists completed by the family
    CompletedLists,
    /// Budget transactions recorded by the family
    BudgetTransactions,
    /// The family level
    FamilyLevel,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompletedTasks => "completed_tasks",
            Self::FamilyCompletedTasks => "family_completed_tasks",
            Self::Lists => "lists",
            Self::CompletedLists => "completed_lists",
            Self::BudgetTransactions => "budget_transactions",
            Self::FamilyLevel => "family_level",
        }
    }
}

/// Window a streak or percentage requirement refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Day,
    Week,
    Month,
}

/// Condition of a `special` requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Task completed before 08:00 local time
    EarlyCompletion,
    /// Task completed at or after 22:00 local time
    LateCompletion,
    /// A `list_created` action that brings the family list count to the target
    CreateList,
    /// A `budget_transaction` action that brings the transaction count to the target
    FirstBudgetEntry,
}

/// Unlock requirement of a badge
///
/// Serialized with a `type` tag: `{"type": "count", "metric": ..., "target": 10}`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    Count {
        metric: Metric,
        target: u32,
    },
    Streak {
        target: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        timeframe: Option<Timeframe>,
    },
    Percentage {
        target: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        timeframe: Option<Timeframe>,
    },
    Special {
        target: u32,
        condition: Condition,
    },
}

/// Badge definition (compiled-in, never persisted)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BadgeCategory,
    pub points: i64,
    pub requirements: Requirement,
    pub rarity: Rarity,
}

/// Action that triggers an achievement check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TaskCompleted,
    TaskCreated,
    ListCreated,
    ListCompleted,
    BudgetTransaction,
    ChatMessage,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCompleted => "task_completed",
            Self::TaskCreated => "task_created",
            Self::ListCreated => "list_created",
            Self::ListCompleted => "list_completed",
            Self::BudgetTransaction => "budget_transaction",
            Self::ChatMessage => "chat_message",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AchievementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_completed" => Ok(Self::TaskCompleted),
            "task_created" => Ok(Self::TaskCreated),
            "list_created" => Ok(Self::ListCreated),
            "list_completed" => Ok(Self::ListCompleted),
            "budget_transaction" => Ok(Self::BudgetTransaction),
            "chat_message" => Ok(Self::ChatMessage),
            other => Err(AchievementError::InvalidInput(format!(
                "unknown action type: {other}"
            ))),
        }
    }
}

/// Input event of one achievement check (ephemeral)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementCheckContext {
    pub family_id: i64,
    pub user_id: i64,
    pub action: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Unlocked badge of a family (one row per family + badge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FamilyAchievement {
    pub id: i64,
    pub family_id: i64,
    pub badge_id: String,
    pub unlocked_by: i64,
    pub unlocked_at: i64,
    pub metadata: Option<Value>,
}

/// Family level & points (one row per family)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FamilyLevel {
    pub family_id: i64,
    pub level: i32,
    pub total_points: i64,
    pub current_level_points: i64,
    pub points_to_next_level: i64,
    pub updated_at: i64,
}

/// `POST /api/achievements/check` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCheckRequest {
    pub action: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Unlocked achievement joined with its catalog entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub badge_id: String,
    pub unlocked_by: i64,
    pub unlocked_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// `None` when the stored badge id is no longer in the catalog
    pub badge: Option<Badge>,
}

/// Result of one achievement check
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementCheckResult {
    pub new_achievements: Vec<UnlockedAchievement>,
    pub points_earned: i64,
    pub total_new_badges: usize,
    pub family_level: FamilyLevel,
}

/// Overall unlock progress of a family
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub unlocked: usize,
    pub total: usize,
    pub percent: f64,
}

/// `GET /api/achievements/family-achievements` response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyAchievementsResponse {
    pub achievements: Vec<UnlockedAchievement>,
    pub progress: AchievementProgress,
}
