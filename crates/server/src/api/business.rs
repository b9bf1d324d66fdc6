use dioxus::prelude::*;
use shared_types::{Business, BusinessPayload, BusinessSummary};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
fn parse_business_id(id: &str) -> Result<uuid::Uuid, ServerFnError> {
    uuid::Uuid::parse_str(id).map_err(|_| {
        shared_types::AppError::invalid("Invalid business id").into_server_fn_error()
    })
}

/// Key behind one of our own asset URLs.
#[cfg(feature = "server")]
fn stored_asset_key(url: &str) -> Option<String> {
    use crate::storage::{assets_store, ObjectStore};

    if !crate::config::feature_flags().s3 {
        return None;
    }
    assets_store().ok()?.key_for_url(url)
}

/// Insert a listing owned by the caller.
#[cfg_attr(feature = "server", tracing::instrument(skip(payload)))]
#[server]
pub async fn create_business(payload: BusinessPayload) -> Result<Business, ServerFnError> {
    use super::auth::require_auth;
    use crate::db::get_db;
    use crate::error_convert::ValidateRequest;
    use crate::repo::business;
    use crate::write_guard::settle_listing_write;

    let claims = require_auth()?;
    let payload = settle_listing_write(
        claims.sub,
        payload,
        None,
        stored_asset_key,
        chrono::Utc::now(),
    )
    .map_err(|e| e.into_server_fn_error())?;
    payload
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    let row = business::create(pool, &payload)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(business_id = %row.id, owner_id = %row.owner_id, "Business listed");
    Ok(row)
}

/// Overwrite a listing the caller owns.
#[cfg_attr(feature = "server", tracing::instrument(skip(payload)))]
#[server]
pub async fn update_business(id: String, payload: BusinessPayload) -> Result<Business, ServerFnError> {
    use super::auth::require_auth;
    use crate::db::get_db;
    use crate::error_convert::ValidateRequest;
    use crate::repo::business;
    use crate::write_guard::settle_listing_write;
    use shared_types::AppError;

    let claims = require_auth()?;
    let id = parse_business_id(&id)?;

    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    let existing = business::find_by_id(pool, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::not_found("Business not found").into_server_fn_error())?;
    if existing.owner_id != claims.sub {
        return Err(
            AppError::forbidden("You can only edit your own listings").into_server_fn_error(),
        );
    }

    let payload = settle_listing_write(
        claims.sub,
        payload,
        Some(&existing),
        stored_asset_key,
        chrono::Utc::now(),
    )
    .map_err(|e| e.into_server_fn_error())?;
    payload
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let row = business::update(pool, id, &payload)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::not_found("Business not found").into_server_fn_error())?;

    tracing::info!(business_id = %row.id, "Business updated");
    Ok(row)
}

/// Load one of the caller's listings for editing.
#[server]
pub async fn get_business(id: String) -> Result<Business, ServerFnError> {
    use super::auth::require_auth;
    use crate::db::get_db;
    use crate::repo::business;
    use shared_types::AppError;

    let claims = require_auth()?;
    let id = parse_business_id(&id)?;

    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    let row = business::find_by_id(pool, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::not_found("Business not found").into_server_fn_error())?;
    if row.owner_id != claims.sub {
        return Err(AppError::not_found("Business not found").into_server_fn_error());
    }
    Ok(row)
}

/// The caller's listings, most recently updated first.
#[server]
pub async fn list_my_businesses() -> Result<Vec<BusinessSummary>, ServerFnError> {
    use super::auth::require_auth;
    use crate::db::get_db;
    use crate::repo::business;

    let claims = require_auth()?;
    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    let rows = business::list_by_owner(pool, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(rows.into_iter().map(BusinessSummary::from).collect())
}
