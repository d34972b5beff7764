//! LoboHub error codes
//!
//! Codes are stable numbers shared with the mobile and web clients. The
//! thousands digit names the area (see [`super::ErrorCategory`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code returned in the `code` field of every error response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx general
    Success = 0,
    ValidationFailed = 2,

    // 1xxx auth
    NotAuthenticated = 1001,
    TokenExpired = 1003,
    TokenInvalid = 1004,

    // 4xxx tasks
    TaskNotFound = 4001,
    TaskAlreadyCompleted = 4002,

    // 5xxx shopping lists
    ListNotFound = 5001,
    ListAlreadyCompleted = 5002,

    // 6xxx budget
    InvalidTransactionAmount = 6001,

    // 7xxx achievements
    BadgeNotFound = 7001,
    /// Negative points or an unknown action reached the engine
    InvalidAchievementInput = 7002,

    // 9xxx system
    InternalError = 9001,
    DatabaseError = 9002,
}

const ALL_CODES: [ErrorCode; 14] = [
    ErrorCode::Success,
    ErrorCode::ValidationFailed,
    ErrorCode::NotAuthenticated,
    ErrorCode::TokenExpired,
    ErrorCode::TokenInvalid,
    ErrorCode::TaskNotFound,
    ErrorCode::TaskAlreadyCompleted,
    ErrorCode::ListNotFound,
    ErrorCode::ListAlreadyCompleted,
    ErrorCode::InvalidTransactionAmount,
    ErrorCode::BadgeNotFound,
    ErrorCode::InvalidAchievementInput,
    ErrorCode::InternalError,
    ErrorCode::DatabaseError,
];

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message, used when no custom message is given
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotAuthenticated => "Missing credentials",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",
            Self::TaskNotFound => "Task not found",
            Self::TaskAlreadyCompleted => "Task has already been completed",
            Self::ListNotFound => "Shopping list not found",
            Self::ListAlreadyCompleted => "Shopping list has already been completed",
            Self::InvalidTransactionAmount => "Transaction amount must be non-zero",
            Self::BadgeNotFound => "Badge not found",
            Self::InvalidAchievementInput => "Invalid achievement input",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ALL_CODES
            .iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_stable() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::TaskNotFound.code(), 4001);
        assert_eq!(ErrorCode::ListAlreadyCompleted.code(), 5002);
        assert_eq!(ErrorCode::InvalidAchievementInput.code(), 7002);
    }

    #[test]
    fn test_every_code_round_trips() {
        for code in ALL_CODES {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_numbers_rejected() {
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(7999), Err(InvalidErrorCode(7999)));
        assert_eq!(InvalidErrorCode(7999).to_string(), "invalid error code: 7999");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::TaskAlreadyCompleted).unwrap(), "4002");

        let code: ErrorCode = serde_json::from_str("6001").unwrap();
        assert_eq!(code, ErrorCode::InvalidTransactionAmount);
        assert!(serde_json::from_str::<ErrorCode>("999").is_err());
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(ErrorCode::ListNotFound.to_string(), "5001");
    }
}
