use shared::models::ShoppingList;
use sqlx::PgPool;

const LIST_LIMIT: i64 = 200;

pub async fn create(
    pool: &PgPool,
    id: i64,
    family_id: i64,
    name: &str,
    created_by: i64,
    now: i64,
) -> Result<ShoppingList, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO shopping_lists (id, family_id, name, created_by, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(id)
    .bind(family_id)
    .bind(name)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, family_id: i64) -> Result<Vec<ShoppingList>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM shopping_lists WHERE family_id = $1
         ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(family_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    family_id: i64,
    id: i64,
) -> Result<Option<ShoppingList>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shopping_lists WHERE family_id = $1 AND id = $2")
        .bind(family_id)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Mark an open list completed. Returns `None` when the list does not exist
/// or is already completed.
pub async fn complete(
    pool: &PgPool,
    family_id: i64,
    id: i64,
    completed_at: i64,
) -> Result<Option<ShoppingList>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE shopping_lists SET completed_at = $3
         WHERE family_id = $1 AND id = $2 AND completed_at IS NULL
         RETURNING *",
    )
    .bind(family_id)
    .bind(id)
    .bind(completed_at)
    .fetch_optional(pool)
    .await
}
