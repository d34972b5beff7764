use shared::models::BudgetTransaction;
use sqlx::PgPool;

const LIST_LIMIT: i64 = 200;

pub async fn create(
    pool: &PgPool,
    id: i64,
    family_id: i64,
    user_id: i64,
    amount_cents: i64,
    description: Option<&str>,
    now: i64,
) -> Result<BudgetTransaction, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO budget_transactions (id, family_id, user_id, amount_cents, description, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(family_id)
    .bind(user_id)
    .bind(amount_cents)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, family_id: i64) -> Result<Vec<BudgetTransaction>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM budget_transactions WHERE family_id = $1
         ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(family_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}
