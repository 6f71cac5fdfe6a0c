use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::startup::AppState;

/// Claims carried by the bearer tokens the identity provider issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email, when the provider includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Authenticated caller, extracted per request.
///
/// Handlers that take this argument require a valid `Authorization: Bearer`
/// token signed with the configured HS256 secret. The caller's identity flows
/// in through this value, never through ambient globals; token issuance is a
/// separate system's job.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub email: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Missing bearer token")))?;

        let decoding_key =
            DecodingKey::from_secret(state.config.auth.jwt_secret.expose_secret().as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?;

        // Add to tracing span for observability
        tracing::Span::current().record("user_id", token_data.claims.sub.as_str());

        Ok(AuthSession {
            user_id: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}
