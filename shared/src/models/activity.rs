//! Family activity models: tasks, shopping lists, budget transactions

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::achievement::AchievementCheckResult;

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Task {
    pub id: i64,
    pub family_id: i64,
    pub title: String,
    pub created_by: i64,
    pub completed_by: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
}

/// Create task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
}

/// Complete task payload
///
/// `completedAt` carries the client's UTC offset so the completion hour can be
/// judged in the member's local time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComplete {
    #[serde(default)]
    pub completed_at: Option<DateTime<FixedOffset>>,
}

/// Shopping list entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShoppingList {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
    pub created_by: i64,
    pub completed_at: Option<i64>,
    pub created_at: i64,
}

/// Create shopping list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListCreate {
    pub name: String,
}

/// Budget transaction entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BudgetTransaction {
    pub id: i64,
    pub family_id: i64,
    pub user_id: i64,
    /// Signed amount in cents (negative = expense)
    pub amount_cents: i64,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Record budget transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTransactionCreate {
    pub amount_cents: i64,
    pub description: Option<String>,
}

/// Response of a mutating activity endpoint: the row plus the achievement
/// check it triggered
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse<T> {
    #[serde(flatten)]
    pub item: T,
    pub achievements: AchievementCheckResult,
}
