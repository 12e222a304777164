//! Signed, expiring session tokens (HS256 JWT).

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

/// Result of checking a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid { username: String },
    Invalid,
}

/// Issues and verifies tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        TokenService {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for `username` valid for the configured TTL from now.
    ///
    /// The caller must already have verified the credential.
    pub fn generate_token(&self, username: &str) -> Result<String, AppError> {
        self.generate_token_at(username, unix_now())
    }

    /// Issue a token as if it had been created at `issued_at` (unix seconds).
    pub fn generate_token_at(&self, username: &str, issued_at: u64) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Check signature and expiry. Every failure collapses to `Invalid`.
    pub fn verify_token(&self, token: &str) -> TokenStatus {
        if token.is_empty() {
            return TokenStatus::Invalid;
        }
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenStatus::Valid {
                username: data.claims.username,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                TokenStatus::Invalid
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
