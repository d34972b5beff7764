//! Error areas derived from the thousands digit of a code

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Family,
    Task,
    List,
    Budget,
    Achievement,
    /// 8xxx and 9xxx; logged when rendered
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Family,
            4 => Self::Task,
            5 => Self::List,
            6 => Self::Budget,
            7 => Self::Achievement,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1000), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(3999), ErrorCategory::Family);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Budget);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::System);
    }

    #[test]
    fn test_codes_land_in_their_area() {
        assert_eq!(ErrorCode::TokenInvalid.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::BadgeNotFound.category(), ErrorCategory::Achievement);
        assert_eq!(ErrorCode::ListNotFound.category(), ErrorCategory::List);
        assert_eq!(
            ErrorCode::InvalidAchievementInput.category(),
            ErrorCategory::Achievement
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::Achievement).unwrap();
        assert_eq!(json, "\"achievement\"");
    }
}
