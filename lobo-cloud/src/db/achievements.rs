use std::collections::HashSet;

use serde_json::Value;
use shared::models::FamilyAchievement;
use sqlx::{PgConnection, PgPool};

pub async fn list(pool: &PgPool, family_id: i64) -> Result<Vec<FamilyAchievement>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM family_achievements WHERE family_id = $1 ORDER BY unlocked_at, id",
    )
    .bind(family_id)
    .fetch_all(pool)
    .await
}

pub async fn held_badge_ids(
    conn: &mut PgConnection,
    family_id: i64,
) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT badge_id FROM family_achievements WHERE family_id = $1")
            .bind(family_id)
            .fetch_all(conn)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Insert an unlock. Returns `None` when the family already holds the badge.
///
/// The row id comes from the identity column.
pub async fn insert(
    conn: &mut PgConnection,
    family_id: i64,
    badge_id: &str,
    unlocked_by: i64,
    unlocked_at: i64,
    metadata: Option<&Value>,
) -> Result<Option<FamilyAchievement>, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO family_achievements (family_id, badge_id, unlocked_by, unlocked_at, metadata)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (family_id, badge_id) DO NOTHING
         RETURNING *",
    )
    .bind(family_id)
    .bind(badge_id)
    .bind(unlocked_by)
    .bind(unlocked_at)
    .bind(metadata)
    .fetch_optional(conn)
    .await
}
