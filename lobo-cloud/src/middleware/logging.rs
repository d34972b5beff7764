//! One log line per request
//!
//! Records the request id set by `SetRequestIdLayer`, the route template,
//! the authenticated member (if any), status and latency.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::header::USER_AGENT;
use tower_http::request_id::RequestId;

use crate::auth::FamilyIdentity;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let method = req.method().clone();
    // Route template keeps ids out of the path field
    let route = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    tracing::debug!(%request_id, %method, %route, %agent, "request");

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    let member = response.extensions().get::<FamilyIdentity>().copied();
    let user_id = member.map(|m| m.user_id);
    let family_id = member.map(|m| m.family_id);

    if status >= 500 {
        tracing::error!(%request_id, %method, %route, status, latency_ms, ?user_id, ?family_id, "response");
    } else if status >= 400 {
        tracing::warn!(%request_id, %method, %route, status, latency_ms, ?user_id, ?family_id, "response");
    } else {
        tracing::info!(%request_id, %method, %route, status, latency_ms, ?user_id, ?family_id, "response");
    }

    response
}
