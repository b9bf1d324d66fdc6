//! Server-side settling of the columns a client must not choose freely.

use chrono::{DateTime, Utc};
use shared_types::{
    key_owned_by, AppError, Business, BusinessPayload, MAX_PRODUCT_IMAGES,
    PAYMENT_STATUS_TO_BE_CONFIRMED,
};
use uuid::Uuid;

/// Rewrite `payload` before it is inserted (`stored` is `None`) or written
/// over `stored`.
///
/// The owner becomes `caller`. Product images must be URLs already on the
/// stored row or the caller's own `products/` uploads. Payment status and
/// date are never taken from the client: a receipt URL that differs from
/// the stored one must be the caller's own `receipts/` upload and restarts
/// confirmation at `now`; anything else keeps the stored receipt, status
/// and date.
pub fn settle_listing_write(
    caller: Uuid,
    payload: BusinessPayload,
    stored: Option<&Business>,
    key_for_url: impl Fn(&str) -> Option<String>,
    now: DateTime<Utc>,
) -> Result<BusinessPayload, AppError> {
    let caller_id = caller.to_string();
    let uploaded_by_caller = |url: &str, prefix: &str| {
        key_for_url(url).is_some_and(|key| key.starts_with(prefix) && key_owned_by(&key, &caller_id))
    };

    let stored_images = stored
        .and_then(|b| b.product_images.as_deref())
        .unwrap_or_default();
    let images = payload.product_images.as_deref().unwrap_or_default();
    if images.len() > MAX_PRODUCT_IMAGES {
        return Err(AppError::invalid(format!(
            "A listing can have at most {MAX_PRODUCT_IMAGES} product images"
        )));
    }
    if let Some(url) = images
        .iter()
        .find(|url| !stored_images.contains(*url) && !uploaded_by_caller(url.as_str(), "products/"))
    {
        tracing::warn!(user_id = %caller, url = %url, "Rejected product image URL");
        return Err(AppError::forbidden("Product images must be your own uploads"));
    }

    let stored_receipt = stored.and_then(|b| b.receipt_url.clone());
    let (receipt_url, payment_status, last_payment_date) = match payload.receipt_url.clone() {
        Some(url) if Some(&url) != stored_receipt.as_ref() => {
            if !uploaded_by_caller(&url, "receipts/") {
                tracing::warn!(user_id = %caller, url = %url, "Rejected receipt URL");
                return Err(AppError::forbidden("Receipts must be your own uploads"));
            }
            (
                Some(url),
                PAYMENT_STATUS_TO_BE_CONFIRMED.to_string(),
                Some(now),
            )
        }
        _ => (
            stored_receipt,
            stored
                .and_then(|b| b.payment_status.clone())
                .unwrap_or_else(|| PAYMENT_STATUS_TO_BE_CONFIRMED.to_string()),
            stored.and_then(|b| b.last_payment_date),
        ),
    };

    Ok(BusinessPayload {
        owner_id: caller,
        receipt_url,
        payment_status,
        last_payment_date,
        ..payload
    })
}
