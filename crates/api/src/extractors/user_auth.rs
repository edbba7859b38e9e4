//! User JWT authentication extractor.
//!
//! Validates the Bearer token in the Authorization header and resolves
//! the calling profile. Token issuance lives in the platform's auth
//! service; this API only verifies.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use shared::jwt::{extract_profile_id, JwtConfig};

/// Authenticated profile information from a JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// Profile ID from the JWT subject claim.
    pub profile_id: Uuid,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

/// Builds a verification config from the JWT settings.
fn jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
    JwtConfig::new(
        &config.private_key,
        &config.public_key,
        config.access_token_expiry_secs,
        config.leeway_secs,
    )
    .map_err(|e| e.to_string())
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let config = jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let claims = config
            .validate_access_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let profile_id = extract_profile_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(UserAuth {
            profile_id,
            jti: claims.jti,
        })
    }
}
