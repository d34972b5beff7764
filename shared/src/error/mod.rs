//! Error codes, the [`AppError`] type and its JSON envelope
//!
//! Every failed request answers with `{ "code", "message", "details"? }`
//! where `code` is an [`ErrorCode`] and the HTTP status follows from it.
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("title must not be empty").with_detail("field", "title");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let body = ApiResponse::error(&err);
//! assert_eq!(body.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};

impl From<crate::achievement::AchievementError> for AppError {
    fn from(err: crate::achievement::AchievementError) -> Self {
        AppError::with_message(ErrorCode::InvalidAchievementInput, err.to_string())
    }
}
