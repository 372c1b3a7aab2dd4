//! JWT token generation and validation.
//!
//! Tokens are signed with HS256 and carry the owning user's id. Expiry
//! defaults to 24 hours and is configurable via `security.token_exp_secs`.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::error::AppError;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a string.
    pub sub: String,
    /// Owning user id, used for ownership scoping.
    pub user_id: i64,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Issues and validates signed tokens.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_exp_secs: u64,
}

impl JwtService {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        let secret = config.jwt_secret.expose_secret();
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_exp_secs: config.token_exp_secs,
        })
    }

    /// Generate a token for the given user.
    pub fn generate_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            iat: now,
            exp: now + self.token_exp_secs as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|err| {
            tracing::error!(error = %err, "Failed to encode token");
            AppError::Internal("Token generation failed".to_string())
        })
    }

    /// Validate a token and return its claims.
    ///
    /// Any failure (expired, tampered, wrong algorithm, malformed) collapses
    /// into `Unauthorized` so callers cannot distinguish why a token was
    /// rejected.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "Token validation failed");
                AppError::Unauthorized
            })
    }
}
