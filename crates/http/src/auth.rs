//! Bearer-token authentication.
//!
//! Session tokens are HS256-signed JWTs whose `sub` claim is the owner id of
//! every record the caller may touch.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api_error::ApiError;
use crate::AppState;

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Owner id of the signed-in user.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig").field("secret", &"***").finish()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token lifetime is out of range")]
    TtlOutOfRange,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Sign a session token for `subject`, valid for `ttl`.
pub fn issue_token(
    subject: &str,
    ttl: Duration,
    config: &AuthConfig,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let expires = now.checked_add_signed(ttl).ok_or(TokenError::TtlOutOfRange)?;
    let claims = Claims {
        sub: subject.to_owned(),
        exp: expires.timestamp(),
        iat: now.timestamp(),
    };
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Verify signature and expiry and return the claims.
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub owner_id: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("not authenticated".to_owned()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".to_owned()))?;

        let claims = validate_token(token, &state.auth).map_err(|e| {
            tracing::debug!(error = %e, "rejected session token");
            ApiError::Unauthorized("invalid or expired session".to_owned())
        })?;

        if claims.sub.trim().is_empty() {
            return Err(ApiError::Unauthorized("session has no subject".to_owned()));
        }
        Ok(Self { owner_id: claims.sub })
    }
}
