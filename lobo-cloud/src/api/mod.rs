//! API routes for lobo-cloud

pub mod achievements;
pub mod budget;
pub mod health;
pub mod lists;
pub mod tasks;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::family_auth::family_auth_middleware;
use crate::error::ServiceError;
use crate::middleware::logging_middleware;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

const MAX_NAME_LEN: usize = 200;

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Create the application router with all middleware
pub fn create_router(state: AppState) -> Router {
    // Family API (JWT authenticated)
    let api = Router::new()
        .route("/api/achievements/badges", get(achievements::list_badges))
        .route("/api/achievements/badges/{id}", get(achievements::get_badge))
        .route(
            "/api/achievements/family-level",
            get(achievements::family_level),
        )
        .route(
            "/api/achievements/family-achievements",
            get(achievements::family_achievements),
        )
        .route("/api/achievements/check", post(achievements::check))
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/{id}/complete", post(tasks::complete))
        .route("/api/lists", get(lists::list).post(lists::create))
        .route("/api/lists/{id}/complete", post(lists::complete))
        .route(
            "/api/budget/transactions",
            get(budget::list).post(budget::create),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            family_auth_middleware,
        ));

    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}

fn db_error(e: sqlx::Error) -> AppError {
    ServiceError::from(e).into()
}

/// Trimmed, non-empty, bounded display name.
fn validate_name<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            AppError::validation(format!("{field} must not be empty")).with_detail("field", field),
        );
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(
            AppError::validation(format!("{field} must be at most {MAX_NAME_LEN} characters"))
                .with_detail("field", field),
        );
    }
    Ok(trimmed)
}
