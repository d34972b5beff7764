use shared::models::FamilyLevel;
use sqlx::{PgConnection, PgPool};

const CREATE_IF_MISSING: &str = "INSERT INTO family_levels (family_id, updated_at)
     VALUES ($1, $2)
     ON CONFLICT (family_id) DO NOTHING";

/// Current level of a family, created at level 1 on first access.
pub async fn find_or_create(
    pool: &PgPool,
    family_id: i64,
    now: i64,
) -> Result<FamilyLevel, sqlx::Error> {
    sqlx::query(CREATE_IF_MISSING)
        .bind(family_id)
        .bind(now)
        .execute(pool)
        .await?;
    sqlx::query_as("SELECT * FROM family_levels WHERE family_id = $1")
        .bind(family_id)
        .fetch_one(pool)
        .await
}

/// Create the level row if missing and lock it for the rest of the transaction.
///
/// Concurrent checks for the same family queue up here.
pub async fn lock(
    conn: &mut PgConnection,
    family_id: i64,
    now: i64,
) -> Result<FamilyLevel, sqlx::Error> {
    sqlx::query(CREATE_IF_MISSING)
        .bind(family_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    sqlx::query_as("SELECT * FROM family_levels WHERE family_id = $1 FOR UPDATE")
        .bind(family_id)
        .fetch_one(conn)
        .await
}

pub async fn save(conn: &mut PgConnection, level: &FamilyLevel) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE family_levels
         SET level = $2, total_points = $3, current_level_points = $4,
             points_to_next_level = $5, updated_at = $6
         WHERE family_id = $1",
    )
    .bind(level.family_id)
    .bind(level.level)
    .bind(level.total_points)
    .bind(level.current_level_points)
    .bind(level.points_to_next_level)
    .bind(level.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}
