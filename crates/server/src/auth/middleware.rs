use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot};
use super::jwt::validate_access_token;

/// Permissive auth middleware.
///
/// Validates the access token from the session cookie (or Bearer header) and
/// inserts its `Claims` into request extensions, then applies any cookie
/// change a server function scheduled through the `CookieSlot`.
/// Unauthenticated requests pass through; server functions decide.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_access_token(req.headers()) {
        match validate_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid access token"),
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(action) = cookie_slot.take() {
        cookies::apply(response.headers_mut(), action);
    }

    response
}
