// Server-only auth helpers shared across the api/* modules.

use dioxus::prelude::*;
use shared_types::AppError;

use crate::auth::{cookies, jwt};
use crate::error_convert::AppErrorExt;

/// The caller's validated claims, if any.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

/// Require an authenticated caller.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}
