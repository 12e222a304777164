//! The single admin credential, hashed once at startup.

/// bcrypt work factor for the admin password hash.
pub const BCRYPT_COST: u32 = 10;

/// Username and bcrypt hash of the only account this server knows.
#[derive(Clone)]
pub struct Credential {
    username: String,
    password_hash: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl Credential {
    /// Hash `password` with [`BCRYPT_COST`].
    pub fn new(username: &str, password: &str) -> Result<Self, bcrypt::BcryptError> {
        Self::with_cost(username, password, BCRYPT_COST)
    }

    pub fn with_cost(
        username: &str,
        password: &str,
        cost: u32,
    ) -> Result<Self, bcrypt::BcryptError> {
        let password_hash = bcrypt::hash(password, cost)?;
        Ok(Credential {
            username: username.to_string(),
            password_hash,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a login attempt.
    ///
    /// Returns `false` for any username other than the configured one
    /// without touching the hash. bcrypt errors also count as a mismatch.
    pub fn verify_password(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}
