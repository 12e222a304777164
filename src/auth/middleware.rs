//! Request gate and authenticated-user extractor.

use crate::auth::cookie::{build_clear_cookie, get_cookie, AUTH_COOKIE_NAME};
use crate::auth::credentials::Credential;
use crate::auth::token::{TokenService, TokenStatus};
use crate::config::{Config, LOGIN_PATH};
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub config: Arc<Config>,
    pub credential: Arc<Credential>,
    pub tokens: Arc<TokenService>,
}

/// What the gate decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    PublicPath,
    TokenAbsent,
    TokenInvalid,
    TokenValid { username: String },
}

/// Classify a request by path and `auth-token` cookie.
///
/// Allow-listed paths short-circuit before the cookie is looked at.
pub fn classify(
    path: &str,
    headers: &HeaderMap,
    config: &Config,
    tokens: &TokenService,
) -> GateOutcome {
    if config.is_public_path(path) {
        return GateOutcome::PublicPath;
    }

    let token = match get_cookie(headers, AUTH_COOKIE_NAME) {
        Some(t) if !t.is_empty() => t,
        _ => return GateOutcome::TokenAbsent,
    };

    match tokens.verify_token(token) {
        TokenStatus::Valid { username } => GateOutcome::TokenValid { username },
        TokenStatus::Invalid => GateOutcome::TokenInvalid,
    }
}

/// Gate middleware. Must wrap every route, fallback included.
///
/// ```rust,ignore
/// router.layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match classify(&path, request.headers(), &state.config, &state.tokens) {
        GateOutcome::PublicPath => next.run(request).await,
        GateOutcome::TokenAbsent => {
            tracing::debug!(action = "gate_redirect", path = %path, reason = "no_token");
            Redirect::to(LOGIN_PATH).into_response()
        }
        GateOutcome::TokenInvalid => {
            tracing::info!(action = "gate_redirect", path = %path, reason = "invalid_token");
            // Drop the stale cookie so the browser stops presenting it
            (
                [(header::SET_COOKIE, build_clear_cookie())],
                Redirect::to(LOGIN_PATH),
            )
                .into_response()
        }
        GateOutcome::TokenValid { username } => {
            request.extensions_mut().insert(AuthUser { username });
            next.run(request).await
        }
    }
}

/// Username of the signed-in admin, placed in request extensions by [`require_auth`].
///
/// Rejects with 401 if the gate did not run for this route.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use tower::ServiceExt;
    use zeroize::Zeroizing;

    pub(crate) const TEST_SECRET: &str = "gate-test-secret";

    pub(crate) fn test_config() -> Config {
        Config {
            admin_username: "admin".to_string(),
            admin_password: Zeroizing::new("admin123".to_string()),
            jwt_secret: Zeroizing::new(TEST_SECRET.to_string()),
            token_ttl_secs: 86_400,
            cookie_secure: false,
            public_paths: vec!["/login".to_string()],
            mongodb_uri: "mongodb://127.0.0.1:27017".to_string(),
            mongodb_db: "sablier-test".to_string(),
            bind_addr: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
            static_dir: PathBuf::from("static"),
            insecure_defaults: Vec::new(),
        }
    }

    /// State with a lazily-connecting MongoDB client; no server is contacted
    /// unless a handler issues a query.
    pub(crate) async fn test_state() -> AppState {
        let config = test_config();
        let client = mongodb::Client::with_uri_str(&config.mongodb_uri)
            .await
            .unwrap();
        AppState {
            db: client.database(&config.mongodb_db),
            credential: Arc::new(Credential::with_cost("admin", "admin123", 4).unwrap()),
            tokens: Arc::new(TokenService::new(
                config.jwt_secret.as_bytes(),
                config.token_ttl_secs,
            )),
            config: Arc::new(config),
        }
    }

    async fn whoami(user: AuthUser) -> String {
        user.username
    }

    fn gated_router(state: AppState) -> Router {
        Router::new()
            .route("/login", get(|| async { "login page" }))
            .route("/private", get(whoami))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    fn request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_classify_states() {
        let config = test_config();
        let tokens = TokenService::new(TEST_SECRET.as_bytes(), 60);
        let valid = tokens.generate_token("admin").unwrap();

        let mut headers = HeaderMap::new();
        assert_eq!(
            classify("/login", &headers, &config, &tokens),
            GateOutcome::PublicPath
        );
        assert_eq!(
            classify("/", &headers, &config, &tokens),
            GateOutcome::TokenAbsent
        );

        headers.insert(header::COOKIE, HeaderValue::from_static("auth-token="));
        assert_eq!(
            classify("/", &headers, &config, &tokens),
            GateOutcome::TokenAbsent
        );

        headers.insert(header::COOKIE, HeaderValue::from_static("auth-token=junk"));
        assert_eq!(
            classify("/", &headers, &config, &tokens),
            GateOutcome::TokenInvalid
        );

        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("auth-token={}", valid)).unwrap(),
        );
        assert_eq!(
            classify("/dashboard", &headers, &config, &tokens),
            GateOutcome::TokenValid {
                username: "admin".to_string()
            }
        );
    }

    #[test]
    fn test_public_match_is_exact() {
        let config = test_config();
        let tokens = TokenService::new(TEST_SECRET.as_bytes(), 60);
        let headers = HeaderMap::new();
        for path in ["/login/", "/login/../secret", "/loginx", "/LOGIN"] {
            assert_eq!(
                classify(path, &headers, &config, &tokens),
                GateOutcome::TokenAbsent,
                "{}",
                path
            );
        }
    }

    #[tokio::test]
    async fn test_public_path_proceeds_without_cookie() {
        let app = gated_router(test_state().await);
        let response = app.oneshot(request("/login", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "login page");
    }

    #[tokio::test]
    async fn test_public_path_ignores_bad_cookie() {
        let app = gated_router(test_state().await);
        let response = app
            .oneshot(request("/login", Some("auth-token=forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_missing_cookie_redirects_to_login() {
        let app = gated_router(test_state().await);
        let response = app.oneshot(request("/private", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_invalid_cookie_redirects_and_clears() {
        let app = gated_router(test_state().await);
        let response = app
            .oneshot(request("/private", Some("auth-token=not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("auth-token=;"));
    }

    #[tokio::test]
    async fn test_expired_cookie_redirects() {
        let state = test_state().await;
        let stale = state.tokens.generate_token_at("admin", 1_000).unwrap();
        let app = gated_router(state);
        let response = app
            .oneshot(request("/private", Some(&format!("auth-token={}", stale))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_valid_cookie_proceeds_with_user() {
        let state = test_state().await;
        let token = state.tokens.generate_token("admin").unwrap();
        let app = gated_router(state);
        let response = app
            .oneshot(request(
                "/private",
                Some(&format!("theme=dark; auth-token={}", token)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "admin");
    }

    #[tokio::test]
    async fn test_auth_user_without_gate_is_unauthorized() {
        let app: Router = Router::new().route("/private", get(whoami));
        let response = app.oneshot(request("/private", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
