//! `auth-token` cookie helpers.

use axum::http::{header, HeaderMap};

pub const AUTH_COOKIE_NAME: &str = "auth-token";
pub const AUTH_COOKIE_PATH: &str = "/";

/// Value of the cookie called `name`, if the request carries one.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// `Set-Cookie` value storing `token` for `max_age_secs`.
pub fn build_auth_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite=Lax",
        AUTH_COOKIE_NAME, token, AUTH_COOKIE_PATH, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop the auth cookie.
///
/// Name and path must match [`build_auth_cookie`] or the browser keeps the old one.
pub fn build_clear_cookie() -> String {
    format!(
        "{}=; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax",
        AUTH_COOKIE_NAME, AUTH_COOKIE_PATH
    )
}
