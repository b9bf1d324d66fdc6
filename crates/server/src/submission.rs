//! Turning a filled-in form into a stored listing.

use std::fmt;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use shared_types::{
    non_empty_list, non_empty_text, product_image_key, receipt_key, AuthUser, Business,
    BusinessPayload, FormState, PaymentOption, UploadSet, LISTING_CATEGORY,
    PAYMENT_STATUS_TO_BE_CONFIRMED,
};

use crate::backend::ListingBackend;

pub const SIGN_IN_REQUIRED: &str = "Please sign in to list your business.";
pub const GENERIC_FAILURE: &str = "Failed to list business. Please try again.";

/// Why a submission stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Required inputs are empty. Nothing was sent.
    MissingRequired(Vec<&'static str>),
    /// No signed-in user. Nothing was sent.
    AuthenticationRequired,
    /// An upload or the write failed. Completed uploads are left in place.
    Backend(String),
}

impl SubmitError {
    /// Short toast title.
    pub fn title(&self) -> &'static str {
        match self {
            SubmitError::MissingRequired(_) => "Missing Information",
            SubmitError::AuthenticationRequired => "Authentication Required",
            SubmitError::Backend(_) => "Error",
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingRequired(fields) => {
                write!(f, "Please fill in: {}", fields.join(", "))
            }
            SubmitError::AuthenticationRequired => f.write_str(SIGN_IN_REQUIRED),
            SubmitError::Backend(message) if message.trim().is_empty() => {
                f.write_str(GENERIC_FAILURE)
            }
            SubmitError::Backend(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for SubmitError {}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Business),
    Updated(Business),
}

impl SubmitOutcome {
    pub fn business(&self) -> &Business {
        match self {
            SubmitOutcome::Created(b) | SubmitOutcome::Updated(b) => b,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            SubmitOutcome::Created(_) => "Your business has been listed successfully.",
            SubmitOutcome::Updated(_) => "Your business has been updated successfully.",
        }
    }
}

/// Receipt and payment columns of the written record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub receipt_url: Option<String>,
    pub payment_status: String,
    pub last_payment_date: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// A receipt uploaded just now.
    pub fn fresh_receipt(url: String, now: DateTime<Utc>) -> Self {
        Self {
            receipt_url: Some(url),
            payment_status: PAYMENT_STATUS_TO_BE_CONFIRMED.to_string(),
            last_payment_date: Some(now),
        }
    }

    /// No new receipt: keep whatever the edited record had.
    pub fn carried_over(existing: Option<&Business>) -> Self {
        Self {
            receipt_url: existing.and_then(|b| b.receipt_url.clone()),
            payment_status: existing
                .and_then(|b| b.payment_status.clone())
                .unwrap_or_else(|| PAYMENT_STATUS_TO_BE_CONFIRMED.to_string()),
            last_payment_date: existing.and_then(|b| b.last_payment_date),
        }
    }
}

/// Build the write body from the form, the final image URL list and the
/// payment columns.
pub fn assemble_payload(
    owner: &AuthUser,
    form: &FormState,
    product_images: Vec<String>,
    payment: PaymentRecord,
) -> BusinessPayload {
    BusinessPayload {
        owner_id: owner.id,
        name: form.name.clone(),
        description: form.description.clone(),
        category: LISTING_CATEGORY.to_string(),
        phone: form.phone.clone(),
        address: form.address.clone(),
        towns: form.town().to_string(),
        province_district: form.province_district().to_string(),
        zip_code: form.zip_code.clone(),
        website: form.website.clone(),
        information_website: non_empty_text(&form.information_website),
        facebook_page: non_empty_text(&form.facebook_page),
        tiktok_url: non_empty_text(&form.tiktok_url),
        starting_price: non_empty_text(&form.starting_price),
        number_of_fields: i32::try_from(form.number_of_fields()).unwrap_or(1),
        field_details: form.field_details().to_vec(),
        payment_methods: non_empty_list(form.payment_methods().to_vec()),
        facilities: non_empty_list(form.facilities().to_vec()),
        business_options: non_empty_list(form.options().to_vec()),
        opening_hours: form.opening_hours_json(),
        product_images: non_empty_list(product_images),
        receipt_url: payment.receipt_url,
        payment_status: payment.payment_status,
        last_payment_date: payment.last_payment_date,
        pos_website: form.online_shop_option.as_flag(),
    }
}

/// Validate, upload and write one listing.
///
/// Stages run in order: required-field check, sign-in check, concurrent
/// product image uploads, receipt upload (bank transfer only), then a single
/// insert, or an update when `existing` is set. The first failure stops the
/// pipeline.
#[tracing::instrument(skip_all, fields(editing = existing.is_some()))]
pub async fn submit_listing(
    backend: &impl ListingBackend,
    user: Option<&AuthUser>,
    form: &FormState,
    uploads: &UploadSet,
    existing: Option<&Business>,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, SubmitError> {
    let missing = form.missing_required(uploads.receipt().is_some());
    if !missing.is_empty() {
        return Err(SubmitError::MissingRequired(missing));
    }

    let user = user.ok_or(SubmitError::AuthenticationRequired)?;
    let user_id = user.id.to_string();
    let timestamp_ms = now.timestamp_millis();

    let new_urls = try_join_all(uploads.new_images().iter().enumerate().map(|(index, file)| {
        let key = product_image_key(&user_id, timestamp_ms, index, &file.name);
        async move { backend.upload_asset(&key, file).await }
    }))
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Product image upload failed");
        SubmitError::Backend(e)
    })?;

    let mut product_images = uploads.existing_images().to_vec();
    product_images.extend(new_urls);

    let payment = match (form.payment_option, uploads.receipt()) {
        (PaymentOption::Bank, Some(receipt)) => {
            let key = receipt_key(&user_id, timestamp_ms, &receipt.name);
            let url = backend.upload_asset(&key, receipt).await.map_err(|e| {
                tracing::error!(error = %e, "Receipt upload failed");
                SubmitError::Backend(e)
            })?;
            PaymentRecord::fresh_receipt(url, now)
        }
        _ => PaymentRecord::carried_over(existing),
    };

    let payload = assemble_payload(user, form, product_images, payment);

    let outcome = match existing {
        Some(record) => backend
            .update_business(record.id, payload)
            .await
            .map(SubmitOutcome::Updated),
        None => backend
            .insert_business(payload)
            .await
            .map(SubmitOutcome::Created),
    };

    outcome.map_err(|e| {
        tracing::error!(error = %e, "Error listing business");
        SubmitError::Backend(e)
    })
}
