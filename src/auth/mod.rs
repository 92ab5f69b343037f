use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

pub mod password;

/// Token payload: who the bearer is and when the token stops being valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(email: String, id: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            email,
            id,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing secret is empty")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 session tokens with a server-held secret.
///
/// Only the signature and `exp` are checked. There is no issuer/audience
/// and no revocation, so a token stays valid until it expires.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, TokenError> {
        // capped at a year
        let hours = config.token_expiry_hours.min(24 * 365) as i64;
        Self::new(&config.token_secret, Duration::hours(hours))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user` valid from now
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(&user.email, user.id, Utc::now())
    }

    pub fn issue_at(
        &self,
        email: &str,
        id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(email.to_string(), id, issued_at, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Generation)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
