use dioxus::prelude::*;
use shared_types::AuthUser;

/// The signed-in user, or `None` for anonymous callers.
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    use super::auth::current_claims;

    Ok(current_claims().map(|claims| claims.auth_user()))
}

/// Exchange an access token from the auth provider for an HTTP-only
/// session cookie.
#[cfg_attr(feature = "server", tracing::instrument(skip(access_token)))]
#[server]
pub async fn establish_session(access_token: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{cookies, jwt};
    use crate::error_convert::AppErrorExt;
    use shared_types::AppError;

    let claims = jwt::validate_access_token(access_token.trim()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected access token");
        AppError::unauthorized("Invalid or expired token").into_server_fn_error()
    })?;

    cookies::schedule_session_cookie(access_token.trim(), claims.remaining_secs());
    tracing::info!(user_id = %claims.sub, "Session established");
    Ok(claims.auth_user())
}

/// Clear the session cookie.
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    crate::auth::cookies::schedule_clear_cookie();
    Ok(())
}
