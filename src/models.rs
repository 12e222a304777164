//! Request and response models.
//!
//! Catalog models mirror the MongoDB documents, which use camelCase keys.

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Models
// ============================================================================

/// Login form submitted to `POST /login`.
///
/// Missing fields read as empty so an incomplete form fails verification
/// like any other wrong credential.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response for `GET /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
}

// ============================================================================
// Catalog Models
// ============================================================================

/// A payment stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub stream_id: String,
    pub coin_key: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub key: String,
    pub coin: String,
    pub image: String,
    pub chain_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub chain_id: String,
    pub chain_name: String,
    pub chain_image: String,
}
