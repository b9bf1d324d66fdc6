use dioxus::prelude::*;

/// Store a base64-encoded listing asset and return its public URL.
///
/// The key must be under the caller's own `products/` or `receipts/`
/// folder; existing objects are never overwritten.
#[cfg_attr(feature = "server", tracing::instrument(skip(file_data)))]
#[server]
pub async fn upload_listing_asset(
    key: String,
    content_type: String,
    file_data: String,
) -> Result<String, ServerFnError> {
    use super::auth::require_auth;
    use crate::error_convert::AppErrorExt;
    use crate::storage::{assets_store, store_listing_asset};
    use shared_types::{content_type_allowed, AppError};

    if !crate::config::feature_flags().s3 {
        return Err(AppError::invalid("File uploads are disabled").into_server_fn_error());
    }

    let claims = require_auth()?;

    if !content_type_allowed(&key, &content_type) {
        return Err(AppError::invalid(
            "Product images must be images; receipts must be images or PDF",
        )
        .into_server_fn_error());
    }

    let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &file_data)
        .map_err(|e| {
            AppError::invalid(format!("Invalid file data: {}", e)).into_server_fn_error()
        })?;

    let store = assets_store().map_err(|e| e.into_server_fn_error())?;
    let url = store_listing_asset(
        store,
        claims.sub,
        &key,
        &content_type,
        bytes,
        crate::config::max_upload_bytes(),
    )
    .await
    .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(user_id = %claims.sub, key = %key, "Stored listing asset");
    Ok(url)
}
