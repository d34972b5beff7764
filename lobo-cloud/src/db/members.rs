//! Family roster
//!
//! Members are registered the first time they act and their activity
//! timestamp is refreshed on every achievement check.

use sqlx::PgPool;

/// Insert the member if unknown and mark them active at `now`.
pub async fn touch(
    pool: &PgPool,
    family_id: i64,
    user_id: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO family_members (family_id, user_id, joined_at, last_active_at)
         VALUES ($1, $2, $3, $3)
         ON CONFLICT (family_id, user_id)
         DO UPDATE SET last_active_at = GREATEST(family_members.last_active_at, EXCLUDED.last_active_at)",
    )
    .bind(family_id)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns `(active_since, total)` member counts for a family.
pub async fn participation(
    pool: &PgPool,
    family_id: i64,
    active_since: i64,
) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) FILTER (WHERE last_active_at >= $2), COUNT(*)
         FROM family_members WHERE family_id = $1",
    )
    .bind(family_id)
    .bind(active_since)
    .fetch_one(pool)
    .await
}
