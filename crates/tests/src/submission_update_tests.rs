use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use server::submission::{assemble_payload, submit_listing, PaymentRecord, SubmitOutcome};
use shared_types::{Business, FormState, PaymentOption, UploadSet, PAYMENT_STATUS_TO_BE_CONFIRMED};
use uuid::Uuid;

use crate::common::{
    asset_url, business_from_payload, complete_form, fixed_now, image, owner, receipt, stages,
    Call, MockBackend,
};

fn stored_listing(owner_id: Uuid) -> Business {
    let user = shared_types::AuthUser {
        id: owner_id,
        email: String::new(),
        role: "authenticated".to_string(),
    };
    let payment = PaymentRecord {
        receipt_url: Some("https://assets.test/business-assets/receipts/old/1_slip.pdf".into()),
        payment_status: "confirmed".to_string(),
        last_payment_date: Some(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()),
    };
    let payload = assemble_payload(
        &user,
        &complete_form(),
        vec!["https://assets.test/a.jpg".into(), "https://assets.test/b.jpg".into()],
        payment,
    );
    business_from_payload(Uuid::new_v4(), payload)
}

#[tokio::test]
async fn edit_updates_by_id_and_never_inserts() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);

    let mut form = FormState::from_business(&record);
    form.payment_option = PaymentOption::Stripe;
    form.name = "Goal Arena North".to_string();
    let uploads = UploadSet::with_existing(record.product_images.clone().unwrap_or_default());

    let outcome = submit_listing(&backend, Some(&user), &form, &uploads, Some(&record), fixed_now())
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Updated(_)));
    assert_eq!(
        outcome.success_message(),
        "Your business has been updated successfully."
    );
    assert_eq!(outcome.business().id, record.id);

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    let Call::Update(id, payload) = &writes[0] else {
        panic!("expected an update, got {writes:?}");
    };
    assert_eq!(*id, record.id);
    assert_eq!(payload.name, "Goal Arena North");
    assert_eq!(payload.product_images, record.product_images);
}

#[tokio::test]
async fn edit_without_new_receipt_carries_payment_over() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);

    let mut form = FormState::from_business(&record);
    form.payment_option = PaymentOption::Stripe;

    submit_listing(
        &backend,
        Some(&user),
        &form,
        &UploadSet::default(),
        Some(&record),
        fixed_now(),
    )
    .await
    .unwrap();

    let Call::Update(_, payload) = &backend.writes()[0] else {
        panic!("expected an update");
    };
    assert_eq!(payload.receipt_url, record.receipt_url);
    assert_eq!(payload.payment_status, "confirmed");
    assert_eq!(payload.last_payment_date, record.last_payment_date);
}

#[tokio::test]
async fn edit_with_new_receipt_resets_payment_status() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);
    let now = fixed_now();

    let form = FormState::from_business(&record);
    assert_eq!(form.payment_option, PaymentOption::Bank);
    let mut uploads = UploadSet::with_existing(record.product_images.clone().unwrap_or_default());
    uploads.accept_receipt(receipt("march.pdf")).unwrap();

    submit_listing(&backend, Some(&user), &form, &uploads, Some(&record), now)
        .await
        .unwrap();

    let key = format!("receipts/{}/{}_march.pdf", user.id, now.timestamp_millis());
    assert_eq!(backend.upload_keys(), vec![key.clone()]);
    let Call::Update(_, payload) = &backend.writes()[0] else {
        panic!("expected an update");
    };
    assert_eq!(payload.receipt_url, Some(asset_url(&key)));
    assert_eq!(payload.payment_status, PAYMENT_STATUS_TO_BE_CONFIRMED);
    assert_eq!(payload.last_payment_date, Some(now));
}

#[tokio::test]
async fn kept_images_come_before_new_ones() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);
    let now = fixed_now();

    let mut form = FormState::from_business(&record);
    form.payment_option = PaymentOption::Stripe;
    let mut uploads = UploadSet::with_existing(record.product_images.clone().unwrap_or_default());
    uploads.remove_existing("https://assets.test/a.jpg");
    uploads
        .accept_product_images(vec![image("c.jpg", 10), image("d.jpg", 10)])
        .unwrap();

    submit_listing(&backend, Some(&user), &form, &uploads, Some(&record), now)
        .await
        .unwrap();

    let ts = now.timestamp_millis();
    let Call::Update(_, payload) = &backend.writes()[0] else {
        panic!("expected an update");
    };
    assert_eq!(
        payload.product_images,
        Some(vec![
            "https://assets.test/b.jpg".to_string(),
            asset_url(&format!("products/{}/{ts}_0_c.jpg", user.id)),
            asset_url(&format!("products/{}/{ts}_1_d.jpg", user.id)),
        ])
    );
}

#[tokio::test]
async fn removing_every_image_stores_null() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);

    let mut form = FormState::from_business(&record);
    form.payment_option = PaymentOption::Stripe;
    let mut uploads = UploadSet::with_existing(record.product_images.clone().unwrap_or_default());
    uploads.remove_existing("https://assets.test/a.jpg");
    uploads.remove_existing("https://assets.test/b.jpg");

    submit_listing(&backend, Some(&user), &form, &uploads, Some(&record), fixed_now())
        .await
        .unwrap();

    let Call::Update(_, payload) = &backend.writes()[0] else {
        panic!("expected an update");
    };
    assert_eq!(payload.product_images, None);
}

#[tokio::test]
async fn edit_uploads_image_then_receipt_then_updates() {
    let backend = MockBackend::new();
    let user = owner();
    let record = stored_listing(user.id);

    let form = FormState::from_business(&record);
    let mut uploads = UploadSet::with_existing(record.product_images.clone().unwrap_or_default());
    uploads.accept_product_images(vec![image("goal.jpg", 10)]).unwrap();
    uploads.accept_receipt(receipt("april.pdf")).unwrap();

    submit_listing(&backend, Some(&user), &form, &uploads, Some(&record), fixed_now())
        .await
        .unwrap();

    assert_eq!(stages(&backend.calls()), vec!["image", "receipt", "update"]);
}
