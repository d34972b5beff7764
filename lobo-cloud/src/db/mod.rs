//! Database access layer

pub mod achievements;
pub mod budget;
pub mod counters;
pub mod levels;
pub mod lists;
pub mod members;
pub mod tasks;

/// Live database for the `#[ignore]`d tests; run them with
/// `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
pub mod test_db {
    use sqlx::PgPool;
    use sqlx::postgres::PgPoolOptions;

    pub async fn connect() -> PgPool {
        let _ = dotenvy::dotenv();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .connect(&url)
            .await
            .expect("Failed to connect to PostgreSQL");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    /// Fresh 40-bit family id so runs never see each other's rows
    pub fn family_id() -> i64 {
        (uuid::Uuid::new_v4().as_u64_pair().0 & 0xFF_FFFF_FFFF) as i64
    }

    /// Activity row id `n` of a test family, unique across families
    pub fn row_id(family_id: i64, n: i64) -> i64 {
        family_id * 1000 + n
    }
}
