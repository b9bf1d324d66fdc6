use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

pub const SESSION_COOKIE: &str = "listing_access";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn header_value(cookie: Cookie<'_>) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Build a Set-Cookie header value holding the access token.
pub fn build_session_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    header_value(cookie.build())
}

/// Build a Set-Cookie header value that clears the session cookie.
pub fn build_clear_cookie() -> Option<HeaderValue> {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build();
    header_value(cookie)
}

/// Extract the access token from the session cookie, falling back to a
/// Bearer header.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name && !c.value().is_empty() {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Cookie change requested by a server function, applied by the middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set { access_token: String, max_age_secs: i64 },
    Clear,
}

/// Shared slot in request extensions for server functions to schedule a
/// cookie change.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Schedule the session cookie to be set on the response.
pub fn schedule_session_cookie(access_token: &str, max_age_secs: i64) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        max_age_secs,
    });
}

/// Schedule the session cookie to be cleared on the response.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

/// Write a pending action onto response headers.
pub fn apply(headers: &mut HeaderMap, action: PendingCookieAction) {
    let value = match action {
        PendingCookieAction::Set {
            access_token,
            max_age_secs,
        } => build_session_cookie(&access_token, max_age_secs),
        PendingCookieAction::Clear => build_clear_cookie(),
    };
    match value {
        Some(v) => {
            headers.append(header::SET_COOKIE, v);
        }
        None => tracing::warn!("Dropped session cookie with invalid header value"),
    }
}
