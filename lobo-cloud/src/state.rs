//! Application state

use chrono::FixedOffset;
use sqlx::PgPool;

use crate::config::Config;
use crate::services::achievements::CheckSettings;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for member authentication
    pub jwt_secret: String,
    /// Offset used for local hours and streak days when an event carries none
    pub family_offset: FixedOffset,
    /// Window for "active this week", in days
    pub active_window_days: u32,
}

impl AppState {
    /// Connect to PostgreSQL and run pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Self::with_pool(pool, config)
    }

    /// Build state around an existing pool (no migrations)
    pub fn with_pool(pool: PgPool, config: &Config) -> Result<Self, BoxError> {
        let family_offset = FixedOffset::east_opt(config.family_utc_offset_minutes * 60)
            .ok_or("FAMILY_UTC_OFFSET_MINUTES out of range")?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            family_offset,
            active_window_days: config.active_window_days,
        })
    }

    pub fn check_settings(&self) -> CheckSettings {
        CheckSettings {
            family_offset: self.family_offset,
            active_window_days: self.active_window_days,
        }
    }
}
