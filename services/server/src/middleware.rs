//! Cookie-based authentication for protected routes
//!
//! The session token travels in an HTTP-only cookie, so authentication is
//! an extractor over the request cookies rather than an `Authorization`
//! header layer: handlers that take an [`AuthUser`] argument are protected,
//! everything else stays public.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Authenticated user information attached to the request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(ApiError::Unauthorized)?;

        let claims = state.jwt_service.validate_token(&token).map_err(|e| {
            error!("Failed to validate session token: {}", e);
            ApiError::Unauthorized
        })?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
