use pretty_assertions::assert_eq;
use server::submission::{submit_listing, SubmitError, GENERIC_FAILURE, SIGN_IN_REQUIRED};
use shared_types::{PaymentOption, UploadSet};

use crate::common::{complete_form, fixed_now, image, owner, receipt, Call, MockBackend};

fn bank_uploads() -> UploadSet {
    let mut uploads = UploadSet::default();
    uploads.accept_receipt(receipt("slip.pdf")).unwrap();
    uploads
}

#[tokio::test]
async fn signed_out_submission_makes_no_calls() {
    let backend = MockBackend::new();

    let err = submit_listing(&backend, None, &complete_form(), &bank_uploads(), None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::AuthenticationRequired);
    assert_eq!(err.to_string(), SIGN_IN_REQUIRED);
    assert_eq!(err.title(), "Authentication Required");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn bank_transfer_without_receipt_is_blocked() {
    let backend = MockBackend::new();

    let err = submit_listing(
        &backend,
        Some(&owner()),
        &complete_form(),
        &UploadSet::default(),
        None,
        fixed_now(),
    )
    .await
    .unwrap_err();

    assert_eq!(err, SubmitError::MissingRequired(vec!["Receipt"]));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn required_fields_are_checked_before_sign_in() {
    let backend = MockBackend::new();
    let mut form = complete_form();
    form.name = "   ".to_string();
    form.phone.clear();
    form.payment_option = PaymentOption::Stripe;

    let err = submit_listing(&backend, None, &form, &UploadSet::default(), None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::MissingRequired(vec!["Business Name", "Phone"]));
    assert_eq!(err.title(), "Missing Information");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn image_upload_failure_aborts_before_write() {
    let backend = MockBackend {
        fail_upload_containing: Some(("_1_".to_string(), "Upload failed: quota".to_string())),
        ..MockBackend::new()
    };
    let mut uploads = bank_uploads();
    uploads
        .accept_product_images(vec![image("a.jpg", 10), image("b.jpg", 10)])
        .unwrap();

    let err = submit_listing(&backend, Some(&owner()), &complete_form(), &uploads, None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::Backend("Upload failed: quota".to_string()));
    assert!(backend.writes().is_empty());
    assert!(!backend.upload_keys().iter().any(|k| k.starts_with("receipts/")));
}

#[tokio::test]
async fn receipt_failure_keeps_finished_image_uploads() {
    let backend = MockBackend {
        fail_upload_containing: Some((
            "receipts/".to_string(),
            "The resource already exists".to_string(),
        )),
        ..MockBackend::new()
    };
    let mut uploads = bank_uploads();
    uploads.accept_product_images(vec![image("a.jpg", 10)]).unwrap();

    let err = submit_listing(&backend, Some(&owner()), &complete_form(), &uploads, None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "The resource already exists");
    assert_eq!(backend.upload_keys().len(), 2);
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn write_failure_without_detail_uses_generic_message() {
    let backend = MockBackend {
        fail_write: Some(String::new()),
        ..MockBackend::new()
    };

    let err = submit_listing(&backend, Some(&owner()), &complete_form(), &bank_uploads(), None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err.title(), "Error");
    assert_eq!(err.to_string(), GENERIC_FAILURE);
    let writes = backend.writes();
    assert!(matches!(writes.as_slice(), [Call::Insert(_)]));
}

#[tokio::test]
async fn write_failure_surfaces_backend_message() {
    let backend = MockBackend {
        fail_write: Some("Number of fields must be between 1 and 5".to_string()),
        ..MockBackend::new()
    };

    let err = submit_listing(&backend, Some(&owner()), &complete_form(), &bank_uploads(), None, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Number of fields must be between 1 and 5");
}
