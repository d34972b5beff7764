//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Status sent with an error envelope carrying this code
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;

        match self {
            Success => StatusCode::OK,
            ValidationFailed | InvalidTransactionAmount | InvalidAchievementInput => {
                StatusCode::BAD_REQUEST
            }
            NotAuthenticated | TokenExpired | TokenInvalid => StatusCode::UNAUTHORIZED,
            TaskNotFound | ListNotFound | BadgeNotFound => StatusCode::NOT_FOUND,
            // Completing twice is a state conflict, not a bad request
            TaskAlreadyCompleted | ListAlreadyCompleted => StatusCode::CONFLICT,
            InternalError | DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
