use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Path of the login page. Always public and the target of every redirect.
pub const LOGIN_PATH: &str = "/login";

const DEFAULT_JWT_SECRET: &str = "default-secret-key";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Clone)]
pub struct Config {
    // Admin identity
    pub admin_username: String,
    pub admin_password: Zeroizing<String>,

    // Token signing
    pub jwt_secret: Zeroizing<String>,
    pub token_ttl_secs: u64,
    pub cookie_secure: bool,

    // Gate
    pub public_paths: Vec<String>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_db: String,

    // Server
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,

    /// Environment variables that were absent and fell back to a
    /// publicly known default.
    pub insecure_defaults: Vec<&'static str>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("public_paths", &self.public_paths)
            .field("mongodb_uri", &"[REDACTED]")
            .field("mongodb_db", &self.mongodb_db)
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .field("insecure_defaults", &self.insecure_defaults)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),

    #[error("{0} is not set and STRICT_CONFIG forbids the built-in default")]
    InsecureDefault(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine, variables may come from the process environment
        let _ = dotenvy::dotenv();

        let mut insecure_defaults = Vec::new();

        let jwt_secret = env_or_insecure_default(
            "JWT_SECRET",
            DEFAULT_JWT_SECRET,
            &mut insecure_defaults,
        )?;
        let admin_username = env_or_insecure_default(
            "ADMIN_USERNAME",
            DEFAULT_ADMIN_USERNAME,
            &mut insecure_defaults,
        )?;
        let admin_password = env_or_insecure_default(
            "ADMIN_PASSWORD",
            DEFAULT_ADMIN_PASSWORD,
            &mut insecure_defaults,
        )?;

        let strict = parse_env_or_default("STRICT_CONFIG", false)?;
        if strict {
            if let Some(var) = insecure_defaults.first() {
                return Err(ConfigError::InsecureDefault(var.to_string()));
            }
        }

        let token_ttl_secs: u64 = parse_env_or_default("TOKEN_TTL_SECS", 86_400)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let cookie_secure = parse_env_or_default("COOKIE_SECURE", false)?;

        let public_paths_str = env::var("PUBLIC_PATHS").unwrap_or_default();
        let public_paths = parse_public_paths(&public_paths_str);

        let mongodb_uri =
            env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let mongodb_db = env::var("MONGODB_DB").unwrap_or_else(|_| "sablier-db".to_string());

        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let static_dir =
            PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        Ok(Config {
            admin_username,
            admin_password: Zeroizing::new(admin_password),
            jwt_secret: Zeroizing::new(jwt_secret),
            token_ttl_secs,
            cookie_secure,
            public_paths,
            mongodb_uri,
            mongodb_db,
            bind_addr,
            static_dir,
            insecure_defaults,
        })
    }

    /// Emit one warning per configuration value that fell back to a default.
    pub fn warn_insecure_defaults(&self) {
        for var in &self.insecure_defaults {
            tracing::warn!(
                action = "insecure_default",
                variable = %var,
                "{} is not set, using the built-in default; set it before exposing this server",
                var
            );
        }
    }

    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }
}

/// Read a security-sensitive variable. Absent values fall back to `default`
/// and are recorded; present-but-empty values are rejected.
fn env_or_insecure_default(
    key: &'static str,
    default: &str,
    insecure: &mut Vec<&'static str>,
) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(val) if val.is_empty() => Err(ConfigError::InvalidValue(
            key.to_string(),
            "cannot be empty".to_string(),
        )),
        Ok(val) => Ok(val),
        Err(_) => {
            insecure.push(key);
            Ok(default.to_string())
        }
    }
}

/// Split a comma separated path list. The login page is always included.
fn parse_public_paths(raw: &str) -> Vec<String> {
    let mut paths: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !paths.iter().any(|p| p == LOGIN_PATH) {
        paths.insert(0, LOGIN_PATH.to_string());
    }
    paths
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
