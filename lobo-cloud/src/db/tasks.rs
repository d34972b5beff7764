use shared::models::Task;
use sqlx::PgPool;

const LIST_LIMIT: i64 = 200;

pub async fn create(
    pool: &PgPool,
    id: i64,
    family_id: i64,
    title: &str,
    created_by: i64,
    now: i64,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO tasks (id, family_id, title, created_by, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(id)
    .bind(family_id)
    .bind(title)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, family_id: i64) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM tasks WHERE family_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(family_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, family_id: i64, id: i64) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tasks WHERE family_id = $1 AND id = $2")
        .bind(family_id)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Mark an open task completed. Returns `None` when the task does not exist
/// or is already completed.
pub async fn complete(
    pool: &PgPool,
    family_id: i64,
    id: i64,
    completed_by: i64,
    completed_at: i64,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE tasks SET completed_by = $3, completed_at = $4
         WHERE family_id = $1 AND id = $2 AND completed_at IS NULL
         RETURNING *",
    )
    .bind(family_id)
    .bind(id)
    .bind(completed_by)
    .bind(completed_at)
    .fetch_optional(pool)
    .await
}
