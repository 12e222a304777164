//! Login, logout and session endpoints.

use crate::auth::cookie::{build_auth_cookie, build_clear_cookie};
use crate::auth::middleware::{AppState, AuthUser};
use crate::config::LOGIN_PATH;
use crate::error::AppError;
use crate::models::{LoginForm, SessionResponse};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use zeroize::Zeroizing;

/// Where a successful login lands.
const HOME_PATH: &str = "/";

fn render_login_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|msg| format!(r#"<p class="error" role="alert">{}</p>"#, msg))
        .unwrap_or_default();
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sign in</title>
</head>
<body>
<main>
<h1>Sign in</h1>
{error_html}
<form method="post" action="{LOGIN_PATH}">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
</form>
</main>
</body>
</html>
"#
    )
}

/// GET /login — Login form
pub async fn login_page() -> Html<String> {
    Html(render_login_page(None))
}

/// POST /login — Check credentials, set the auth cookie
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let LoginForm { username, password } = form;
    let password = Zeroizing::new(password);

    // bcrypt is deliberately slow; keep it off the async workers
    let credential = state.credential.clone();
    let attempt = username.clone();
    let valid = tokio::task::spawn_blocking(move || credential.verify_password(&attempt, &password))
        .await
        .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))?;

    if !valid {
        tracing::warn!(action = "auth_failed", username = %username, "Invalid credentials");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Html(render_login_page(Some("Invalid username or password"))),
        )
            .into_response());
    }

    let token = state.tokens.generate_token(&username)?;
    let cookie = build_auth_cookie(&token, state.tokens.ttl_secs(), state.config.cookie_secure);

    tracing::info!(action = "auth_success", username = %username, "Admin signed in");

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(HOME_PATH)).into_response())
}

/// POST /api/logout — Delete the auth cookie
///
/// The token itself stays valid until it expires; only the browser copy is removed.
pub async fn logout() -> impl IntoResponse {
    tracing::info!(action = "logout", "Admin signed out");
    ([(header::SET_COOKIE, build_clear_cookie())], Redirect::to(LOGIN_PATH))
}

/// GET /api/session — Current user
pub async fn session(user: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        username: user.username,
    })
}
