use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Upper bound on token lifetime, keeps the expiry arithmetic in range
const MAX_EXPIRY_HOURS: u64 = 24 * 366;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self::with_expiry(username, is_admin, config::config().security.jwt_expiry_hours)
    }

    pub fn with_expiry(username: impl Into<String>, is_admin: bool, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = i64::try_from(expiry_hours.min(MAX_EXPIRY_HOURS)).unwrap_or(24);
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            username: username.into(),
            is_admin,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

/// Sign claims with the configured secret
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    encode_with_secret(claims, &config::config().security.jwt_secret)
}

/// Verify a token against the configured secret and return its claims
pub fn decode_jwt(token: &str) -> Result<Claims, JwtError> {
    decode_with_secret(token, &config::config().security.jwt_secret)
}

pub fn encode_with_secret(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}
