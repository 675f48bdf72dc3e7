//! HS256 access tokens
//!
//! Tokens carry the user id in `sub` and must be issued by `tubely-access`.
//! Validation is stateless: the service only holds the shared secret.

use crate::auth::models::Claims;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tubely_core::constants::TOKEN_ISSUER;
use tubely_core::AppError;
use uuid::Uuid;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn get_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::AuthMissing("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::AuthMissing("Authorization header is not ASCII".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::AuthMissing("Invalid authorization header format".to_string())
        })?
        .trim();

    if token.is_empty() {
        return Err(AppError::AuthMissing("Empty bearer token".to_string()));
    }

    Ok(token)
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint an access token for `user_id` valid for `ttl`.
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature, expiry and issuer, and return the subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthInvalid("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::AuthInvalid("Invalid token issuer".to_string())
                }
                _ => AppError::AuthInvalid(format!("Invalid token: {}", e)),
            },
        )?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AppError::AuthInvalid(format!("Invalid token subject: {}", e)))
    }
}
