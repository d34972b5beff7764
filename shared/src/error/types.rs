//! `AppError` and the JSON envelope it renders as

use std::collections::HashMap;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::category::ErrorCategory;
use super::codes::ErrorCode;

/// Failure of a request, carried to the client as an [`ApiResponse`]
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Offending field, id or limit
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let details = self.details.get_or_insert_default();
        details.insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, reason)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }
}

/// `{ "code": 4001, "message": "...", "details": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    pub fn error(err: &AppError) -> Self {
        ApiResponse {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        (self.http_status(), Json(ApiResponse::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::TaskNotFound);
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        assert_eq!(err.message, "Task not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("title must not be empty")
            .with_detail("field", "title")
            .with_detail("max", 200);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "title");
        assert_eq!(details["max"], 200);
    }

    #[test]
    fn test_auth_constructors() {
        assert_eq!(AppError::not_authenticated().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(AppError::invalid_token("bad").code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::ListNotFound, "Shopping list 7 not found");
        assert_eq!(err.to_string(), "Shopping list 7 not found");
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::new(ErrorCode::TaskAlreadyCompleted).with_detail("id", 42);
        let json = serde_json::to_value(ApiResponse::error(&err)).unwrap();

        assert_eq!(json["code"], 4002);
        assert_eq!(json["message"], "Task has already been completed");
        assert_eq!(json["details"]["id"], 42);

        let plain = serde_json::to_value(ApiResponse::error(&AppError::not_authenticated())).unwrap();
        assert!(plain.get("details").is_none());
    }

    #[test]
    fn test_envelope_parses_back() {
        let body: ApiResponse =
            serde_json::from_str(r#"{"code":6001,"message":"no"}"#).unwrap();
        assert_eq!(body.code, ErrorCode::InvalidTransactionAmount);
        assert!(body.details.is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorCode::ListNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::new(ErrorCode::DatabaseError).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
