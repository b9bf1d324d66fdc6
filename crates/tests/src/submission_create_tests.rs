use pretty_assertions::assert_eq;
use server::submission::{submit_listing, SubmitOutcome};
use shared_types::{
    FieldPart, OnlineShopOption, OpeningHours, PaymentOption, UploadSet, Weekday,
    PAYMENT_STATUS_TO_BE_CONFIRMED,
};

use crate::common::{
    asset_url, complete_form, fixed_now, image, owner, receipt, stages, Call, MockBackend,
};

#[tokio::test]
async fn bank_transfer_create_uploads_then_inserts_once() {
    let backend = MockBackend::new();
    let user = owner();
    let now = fixed_now();
    let ts = now.timestamp_millis();

    let mut uploads = UploadSet::default();
    uploads
        .accept_product_images(vec![image("front.jpg", 100), image("night.jpg", 200)])
        .unwrap();
    uploads.accept_receipt(receipt("slip.pdf")).unwrap();

    let outcome = submit_listing(&backend, Some(&user), &complete_form(), &uploads, None, now)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert_eq!(
        outcome.success_message(),
        "Your business has been listed successfully."
    );

    let uid = user.id;
    assert_eq!(
        backend.upload_keys(),
        vec![
            format!("products/{uid}/{ts}_0_front.jpg"),
            format!("products/{uid}/{ts}_1_night.jpg"),
            format!("receipts/{uid}/{ts}_slip.pdf"),
        ]
    );

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    let Call::Insert(payload) = &writes[0] else {
        panic!("expected an insert, got {writes:?}");
    };
    assert_eq!(payload.owner_id, uid);
    assert_eq!(payload.category, "Futsal Court Rental");
    assert_eq!(
        payload.product_images,
        Some(vec![
            asset_url(&format!("products/{uid}/{ts}_0_front.jpg")),
            asset_url(&format!("products/{uid}/{ts}_1_night.jpg")),
        ])
    );
    assert_eq!(
        payload.receipt_url,
        Some(asset_url(&format!("receipts/{uid}/{ts}_slip.pdf")))
    );
    assert_eq!(payload.payment_status, PAYMENT_STATUS_TO_BE_CONFIRMED);
    assert_eq!(payload.last_payment_date, Some(now));
}

#[tokio::test]
async fn opening_hours_round_trip_through_payload() {
    let backend = MockBackend::new();
    let mut form = complete_form();
    form.set_open(Weekday::Saturday, "07:00");
    form.set_close(Weekday::Saturday, "23:30");
    form.set_closed(Weekday::Sunday, false);
    form.set_closed(Weekday::Monday, true);

    let mut uploads = UploadSet::default();
    uploads.accept_receipt(receipt("r.png")).unwrap();

    submit_listing(&backend, Some(&owner()), &form, &uploads, None, fixed_now())
        .await
        .unwrap();

    let Call::Insert(payload) = &backend.writes()[0] else {
        panic!("expected an insert");
    };
    let parsed = OpeningHours::from_json(&payload.opening_hours).unwrap();
    assert_eq!(parsed, form.opening_hours);
    assert_eq!(parsed.saturday.open, "07:00");
    assert!(parsed.monday.closed);
    assert!(!parsed.sunday.closed);
}

#[tokio::test]
async fn card_payment_skips_receipt_and_nulls_empty_sets() {
    let backend = MockBackend::new();
    let mut form = complete_form();
    form.payment_option = PaymentOption::Stripe;
    form.online_shop_option = OnlineShopOption::NotNow;

    submit_listing(
        &backend,
        Some(&owner()),
        &form,
        &UploadSet::default(),
        None,
        fixed_now(),
    )
    .await
    .unwrap();

    assert!(backend.upload_keys().is_empty());
    let Call::Insert(payload) = &backend.writes()[0] else {
        panic!("expected an insert");
    };
    assert_eq!(payload.receipt_url, None);
    assert_eq!(payload.last_payment_date, None);
    assert_eq!(payload.payment_status, PAYMENT_STATUS_TO_BE_CONFIRMED);
    assert_eq!(payload.product_images, None);
    assert_eq!(payload.payment_methods, None);
    assert_eq!(payload.facilities, None);
    assert_eq!(payload.business_options, None);
    assert_eq!(payload.information_website, None);
    assert_eq!(payload.facebook_page, None);
    assert_eq!(payload.tiktok_url, None);
    assert_eq!(payload.pos_website, 0);
}

#[tokio::test]
async fn form_selections_reach_the_payload() {
    let backend = MockBackend::new();
    let mut form = complete_form();
    form.payment_option = PaymentOption::Stripe;
    form.set_number_of_fields(3);
    form.set_field_detail(0, FieldPart::Name, "Pitch A");
    form.set_field_detail(2, FieldPart::Price, "30000");
    form.toggle_payment_method("KPay", true);
    form.toggle_payment_method("KPay", true);
    form.toggle_facility("Car Parking", true);
    form.toggle_option("Pickup In-Store", true);
    form.starting_price = "20000".to_string();
    form.tiktok_url = "https://tiktok.example/@goal".to_string();

    submit_listing(
        &backend,
        Some(&owner()),
        &form,
        &UploadSet::default(),
        None,
        fixed_now(),
    )
    .await
    .unwrap();

    let Call::Insert(payload) = &backend.writes()[0] else {
        panic!("expected an insert");
    };
    assert_eq!(payload.number_of_fields, 3);
    assert_eq!(payload.field_details.len(), 3);
    assert_eq!(payload.field_details[0].name, "Pitch A");
    assert_eq!(payload.field_details[2].price, "30000");
    assert_eq!(payload.payment_methods, Some(vec!["KPay".to_string()]));
    assert_eq!(payload.facilities, Some(vec!["Car Parking".to_string()]));
    assert_eq!(
        payload.business_options,
        Some(vec!["Pickup In-Store".to_string()])
    );
    assert_eq!(payload.starting_price.as_deref(), Some("20000"));
    assert_eq!(
        payload.tiktok_url.as_deref(),
        Some("https://tiktok.example/@goal")
    );
    assert_eq!(payload.pos_website, 1);
}

#[tokio::test]
async fn uploads_keep_reported_content_type() {
    let backend = MockBackend::new();
    let mut uploads = UploadSet::default();
    uploads.accept_receipt(receipt("slip.pdf")).unwrap();

    submit_listing(
        &backend,
        Some(&owner()),
        &complete_form(),
        &uploads,
        None,
        fixed_now(),
    )
    .await
    .unwrap();

    let upload = backend
        .calls()
        .into_iter()
        .find(|c| matches!(c, Call::Upload { .. }))
        .unwrap();
    let Call::Upload {
        content_type, size, ..
    } = upload
    else {
        unreachable!();
    };
    assert_eq!(content_type, "application/pdf");
    assert_eq!(size, 64);
}

#[tokio::test]
async fn images_upload_before_receipt_and_both_before_insert() {
    let backend = MockBackend::new();
    let user = owner();

    let mut uploads = UploadSet::default();
    uploads
        .accept_product_images(vec![
            image("a.jpg", 10),
            image("b.jpg", 20),
            image("c.jpg", 30),
        ])
        .unwrap();
    uploads.accept_receipt(receipt("slip.pdf")).unwrap();

    submit_listing(&backend, Some(&user), &complete_form(), &uploads, None, fixed_now())
        .await
        .unwrap();

    assert_eq!(
        stages(&backend.calls()),
        vec!["image", "image", "image", "receipt", "insert"]
    );
}

#[tokio::test]
async fn card_payment_goes_straight_from_images_to_insert() {
    let backend = MockBackend::new();
    let mut form = complete_form();
    form.payment_option = PaymentOption::Stripe;

    let mut uploads = UploadSet::default();
    uploads.accept_product_images(vec![image("a.jpg", 10)]).unwrap();

    submit_listing(&backend, Some(&owner()), &form, &uploads, None, fixed_now())
        .await
        .unwrap();

    assert_eq!(stages(&backend.calls()), vec!["image", "insert"]);
}
