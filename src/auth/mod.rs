//! Single-admin authentication: bcrypt credential, JWT session tokens, cookie gate.

pub mod cookie;
pub mod credentials;
pub mod middleware;
pub mod token;

pub use cookie::{build_auth_cookie, build_clear_cookie, get_cookie, AUTH_COOKIE_NAME};
pub use credentials::Credential;
pub use middleware::{classify, require_auth, AppState, AuthUser, GateOutcome};
pub use token::{Claims, TokenService, TokenStatus};
