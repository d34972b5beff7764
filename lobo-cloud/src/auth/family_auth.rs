//! Family member JWT authentication

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims of a family member
#[derive(Debug, Serialize, Deserialize)]
pub struct FamilyClaims {
    /// User ID (decimal string)
    pub sub: String,
    /// Family the member belongs to
    pub family_id: i64,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated member identity extracted from JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyIdentity {
    pub user_id: i64,
    pub family_id: i64,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a family member
pub fn create_token(
    user_id: i64,
    family_id: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = FamilyClaims {
        sub: user_id.to_string(),
        family_id,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and extract the member identity
pub fn verify_token(token: &str, secret: &str) -> Result<FamilyIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<FamilyClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::token_expired(),
        _ => {
            tracing::debug!("JWT validation failed: {e}");
            AppError::invalid_token("Invalid token")
        }
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::invalid_token("Token subject is not a user id"))?;

    Ok(FamilyIdentity {
        user_id,
        family_id: token_data.claims.family_id,
    })
}

/// Middleware that verifies the member JWT from the Authorization header.
///
/// The identity is inserted into the request extensions for handlers and into
/// the response extensions for request logging.
pub async fn family_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format"))?;

    let identity = verify_token(token, &state.jwt_secret).inspect_err(|e| {
        tracing::warn!(uri = ?request.uri(), code = ?e.code, "Authentication failed");
    })?;

    request.extensions_mut().insert(identity);

    let mut response = next.run(request).await;
    response.extensions_mut().insert(identity);
    Ok(response)
}
