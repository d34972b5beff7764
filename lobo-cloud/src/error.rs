//! Errors raised below the handlers
//!
//! Database failures are kept opaque and surface as `DatabaseError`; domain
//! failures already carry their `AppError` and pass through unchanged.

use shared::achievement::AchievementError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(#[from] BoxError),
    #[error(transparent)]
    App(#[from] AppError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(Box::new(e))
    }
}

impl From<AchievementError> for ServiceError {
    fn from(e: AchievementError) -> Self {
        Self::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(err) => err,
            ServiceError::Db(err) => {
                // Details stay in the log; clients only see the code
                tracing::error!(error = %err, "database operation failed");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_maps_to_database_code() {
        let err: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::from(AppError::new(ErrorCode::TaskNotFound)).into();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn test_achievement_error_is_client_error() {
        let err: AppError =
            ServiceError::from(AchievementError::InvalidInput("bad".into())).into();
        assert_eq!(err.code, ErrorCode::InvalidAchievementInput);
    }
}
