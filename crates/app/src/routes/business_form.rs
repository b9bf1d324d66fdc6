//! The create/edit form for a futsal court listing.

use chrono::Utc;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClock, LdCreditCard, LdImage, LdMapPin, LdStore};
use dioxus_free_icons::Icon;
use server::backend::ServerFnBackend;
use server::catalog::{load_locations, load_plan_prices};
use server::submission::{submit_listing, SubmitError};
use shared_types::{
    content_type_for, validate_product_images, validate_receipt, Business, DayHours,
    FeatureFlags, FieldDetail, FieldPart, FormState, ListingSettings, OnlineShopOption,
    PaymentOption, SelectedFile, TextField, UploadSet, Weekday, BUSINESS_OPTIONS, FACILITIES,
    FIELD_COUNT_OPTIONS, PAYMENT_METHODS, PRODUCT_IMAGE_ACCEPT, RECEIPT_ACCEPT,
};
use shared_ui::{
    use_toast, Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    CheckboxField, CheckboxGroup, Field, FileChip, FileInput, Form, FormRow, FormSelect, Input,
    RadioGroup, RadioOption, Textarea, ToastOptions, Toasts,
};

use crate::auth::use_auth;
use crate::routes::Route;

fn toast_error(toast: Toasts, title: &str, message: impl Into<String>) {
    toast.error(
        title.to_string(),
        ToastOptions::new().description(message.into()),
    );
}

/// Listing form. With `existing` set it edits that record, otherwise it
/// creates a new one. After a successful write `on_success` is called, or
/// the user is sent to the dashboard when no callback is given.
#[component]
pub fn BusinessForm(
    existing: Option<Business>,
    on_success: Option<EventHandler<Business>>,
) -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();
    let uploads_enabled = flags.s3;

    let editing = existing.is_some();
    let seed = existing.clone();
    let mut form = use_signal(move || {
        seed.as_ref()
            .map(FormState::from_business)
            .unwrap_or_default()
    });
    let seed_images = existing
        .as_ref()
        .and_then(|b| b.product_images.clone())
        .unwrap_or_default();
    let mut uploads = use_signal(move || UploadSet::with_existing(seed_images));
    let existing_record = use_signal(move || existing);
    let mut busy = use_signal(|| false);
    // Bumped to remount a file input, which clears its selection.
    let mut image_input_key = use_signal(|| 0u32);
    let mut receipt_input_key = use_signal(|| 0u32);

    // ── Reference data ──

    let plan_prices = use_resource(|| async move { load_plan_prices(&ServerFnBackend).await });
    let location_list = use_resource(|| async move { load_locations(&ServerFnBackend).await });
    let listing_settings = use_resource(|| async move {
        server::api::get_listing_settings()
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Error fetching listing settings");
                ListingSettings::default()
            })
    });

    let prices = use_memo(move || plan_prices.read().clone().unwrap_or_default());
    let locations = use_memo(move || location_list.read().clone().unwrap_or_default());
    let total = use_memo(move || {
        let prices = prices();
        form.read().total_price(&prices.listing, &prices.addon)
    });

    // Receipts cannot be uploaded without storage, so bank transfer is off.
    use_effect(move || {
        if !uploads_enabled && form.peek().payment_option == PaymentOption::Bank {
            form.write().disable_bank_transfer();
        }
    });

    use_effect(move || {
        let locations = locations();
        if !locations.is_empty() {
            form.write().seed_towns(&locations);
        }
    });

    // ── File selection ──

    let on_images = move |evt: FormEvent| async move {
        let files = evt.files();
        let sizes: Vec<u64> = files.iter().map(|f| f.size()).collect();
        let existing_count = uploads.read().existing_images().len();
        if let Err(rejection) = validate_product_images(existing_count, &sizes) {
            toast_error(toast, rejection.title(), rejection.to_string());
            image_input_key += 1;
            return;
        }

        let mut picked = Vec::with_capacity(files.len());
        for file in &files {
            let name = file.name();
            let content_type = content_type_for(&name, file.content_type().as_deref());
            match file.read_bytes().await {
                Ok(bytes) => picked.push(SelectedFile::new(name, content_type, bytes.to_vec())),
                Err(_) => {
                    tracing::error!(file = %name, "Failed to read product image");
                    toast_error(toast, "Error", format!("Could not read {name}. Please try again."));
                    image_input_key += 1;
                    return;
                }
            }
        }
        if let Err(rejection) = uploads.write().accept_product_images(picked) {
            toast_error(toast, rejection.title(), rejection.to_string());
            image_input_key += 1;
        }
    };

    let on_receipt = move |evt: FormEvent| async move {
        let files = evt.files();
        let Some(file) = files.first() else {
            return;
        };
        if let Err(rejection) = validate_receipt(file.size()) {
            toast_error(toast, rejection.title(), rejection.to_string());
            receipt_input_key += 1;
            return;
        }

        let name = file.name();
        let content_type = content_type_for(&name, file.content_type().as_deref());
        let receipt = match file.read_bytes().await {
            Ok(bytes) => SelectedFile::new(name, content_type, bytes.to_vec()),
            Err(_) => {
                tracing::error!(file = %name, "Failed to read receipt");
                toast_error(toast, "Error", format!("Could not read {name}. Please try again."));
                receipt_input_key += 1;
                return;
            }
        };
        if let Err(rejection) = uploads.write().accept_receipt(receipt) {
            toast_error(toast, rejection.title(), rejection.to_string());
            receipt_input_key += 1;
        }
    };

    // ── Submission ──

    let on_submit = move |_evt: FormEvent| {
        let route = route.clone();
        async move {
            if busy() {
                return;
            }
            busy.set(true);

            let user = auth.current_user.read().clone();
            let state = form.read().clone();
            let files = uploads.read().clone();
            let record = existing_record.read().clone();

            let result = submit_listing(
                &ServerFnBackend,
                user.as_ref(),
                &state,
                &files,
                record.as_ref(),
                Utc::now(),
            )
            .await;
            busy.set(false);

            match result {
                Ok(outcome) => {
                    toast.success(
                        "Success".to_string(),
                        ToastOptions::new().description(outcome.success_message().to_string()),
                    );
                    match on_success {
                        Some(handler) => handler.call(outcome.business().clone()),
                        None => {
                            navigator().push(Route::Dashboard {});
                        }
                    }
                }
                Err(err @ SubmitError::AuthenticationRequired) => {
                    toast_error(toast, err.title(), err.to_string());
                    navigator().push(route.sign_in_then());
                }
                Err(err) => toast_error(toast, err.title(), err.to_string()),
            }
        }
    };

    // ── Render data ──

    let state = form.read().clone();
    let files = uploads.read().clone();
    let prices = prices();
    let settings = listing_settings.read().clone().unwrap_or_default();
    let provinces: Vec<String> = locations()
        .into_iter()
        .map(|l| l.province_district)
        .collect();
    let towns = state.available_towns().to_vec();
    let field_details: Vec<(usize, usize, FieldDetail)> = state
        .field_details()
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, d)| (i, i + 1, d))
        .collect();
    let schedule: Vec<(Weekday, DayHours)> = Weekday::ALL
        .iter()
        .map(|&day| (day, state.opening_hours.day(day).clone()))
        .collect();
    let existing_images = files.existing_images().to_vec();
    let new_images: Vec<(usize, String)> = files
        .new_images()
        .iter()
        .enumerate()
        .map(|(i, f)| (i, f.name.clone()))
        .collect();
    let receipt_name = files.receipt().map(|f| f.name.clone());
    let remaining_slots = files.remaining_slots();
    let bank = state.payment_option == PaymentOption::Bank;
    let total_display = format!("{:.2}", total());

    let submit_label = match (busy(), editing) {
        (true, _) => "Submitting...",
        (false, true) => "Update Business",
        (false, false) => "List Business",
    };

    rsx! {
        Form { onsubmit: on_submit,
            Card {
                CardHeader {
                    CardTitle {
                        Icon { icon: LdStore, width: 18, height: 18 }
                        " Business details"
                    }
                    CardDescription { "Tell players about your futsal court." }
                }
                CardContent {
                    Field { label: "Business Name", html_for: "business-name", required: true,
                        Input {
                            id: "business-name",
                            value: state.name.clone(),
                            placeholder: "e.g. Goal Arena",
                            required: true,
                            on_input: move |e: FormEvent| form.write().set_text(TextField::Name, e.value()),
                        }
                    }
                    Field { label: "Description", html_for: "business-description", required: true,
                        Textarea {
                            id: "business-description",
                            value: state.description.clone(),
                            placeholder: "Surfaces, lighting, parking...",
                            required: true,
                            on_input: move |e: FormEvent| form.write().set_text(TextField::Description, e.value()),
                        }
                    }
                    FormRow {
                        Field { label: "Phone", html_for: "business-phone", required: true,
                            Input {
                                id: "business-phone",
                                input_type: "tel",
                                value: state.phone.clone(),
                                required: true,
                                on_input: move |e: FormEvent| form.write().set_text(TextField::Phone, e.value()),
                            }
                        }
                        Field { label: "Starting Price", html_for: "business-starting-price",
                            Input {
                                id: "business-starting-price",
                                value: state.starting_price.clone(),
                                placeholder: "e.g. 20000 per hour",
                                on_input: move |e: FormEvent| form.write().set_text(TextField::StartingPrice, e.value()),
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle { "Fields" }
                    CardDescription { "How many pitches you rent out and their hourly prices." }
                }
                CardContent {
                    Field { label: "Number of Fields", html_for: "number-of-fields", required: true,
                        FormSelect {
                            id: "number-of-fields",
                            value: state.number_of_fields().to_string(),
                            required: true,
                            onchange: move |e: FormEvent| form.write().set_number_of_fields_str(&e.value()),
                            for count in FIELD_COUNT_OPTIONS.iter().copied() {
                                option {
                                    key: "{count}",
                                    value: "{count}",
                                    selected: count == state.number_of_fields(),
                                    "{count}"
                                }
                            }
                        }
                    }
                    for (index, number, detail) in field_details {
                        FormRow { key: "{index}",
                            Field { label: "Field {number} Name",
                                Input {
                                    value: detail.name,
                                    placeholder: "e.g. Pitch A",
                                    on_input: move |e: FormEvent| form.write().set_field_detail(index, FieldPart::Name, e.value()),
                                }
                            }
                            Field { label: "Field {number} Price per Hour",
                                Input {
                                    value: detail.price,
                                    placeholder: "e.g. 25000",
                                    on_input: move |e: FormEvent| form.write().set_field_detail(index, FieldPart::Price, e.value()),
                                }
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle {
                        Icon { icon: LdMapPin, width: 18, height: 18 }
                        " Location"
                    }
                }
                CardContent {
                    FormRow {
                        Field { label: "Province / District", html_for: "province-district",
                            FormSelect {
                                id: "province-district",
                                value: state.province_district().to_string(),
                                placeholder: "Select a province or district",
                                onchange: move |e: FormEvent| {
                                    let locations = locations();
                                    form.write().select_province(&e.value(), &locations);
                                },
                                for province in provinces {
                                    option {
                                        key: "{province}",
                                        value: "{province}",
                                        selected: province == state.province_district(),
                                        "{province}"
                                    }
                                }
                            }
                        }
                        Field { label: "Town", html_for: "town",
                            FormSelect {
                                id: "town",
                                value: state.town().to_string(),
                                placeholder: "Select a town",
                                disabled: towns.is_empty(),
                                onchange: move |e: FormEvent| form.write().set_town(&e.value()),
                                for town in towns {
                                    option {
                                        key: "{town}",
                                        value: "{town}",
                                        selected: town == state.town(),
                                        "{town}"
                                    }
                                }
                            }
                        }
                    }
                    FormRow {
                        Field { label: "Address", html_for: "address",
                            Input {
                                id: "address",
                                value: state.address.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::Address, e.value()),
                            }
                        }
                        Field { label: "Zip Code", html_for: "zip-code",
                            Input {
                                id: "zip-code",
                                value: state.zip_code.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::ZipCode, e.value()),
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle { "Online presence" }
                }
                CardContent {
                    FormRow {
                        Field { label: "Online Shop Website", html_for: "website",
                            Input {
                                id: "website",
                                input_type: "url",
                                value: state.website.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::Website, e.value()),
                            }
                        }
                        Field { label: "Information Website", html_for: "information-website",
                            Input {
                                id: "information-website",
                                input_type: "url",
                                value: state.information_website.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::InformationWebsite, e.value()),
                            }
                        }
                    }
                    FormRow {
                        Field { label: "Facebook Page", html_for: "facebook-page",
                            Input {
                                id: "facebook-page",
                                input_type: "url",
                                value: state.facebook_page.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::FacebookPage, e.value()),
                            }
                        }
                        Field { label: "TikTok", html_for: "tiktok-url",
                            Input {
                                id: "tiktok-url",
                                input_type: "url",
                                value: state.tiktok_url.clone(),
                                on_input: move |e: FormEvent| form.write().set_text(TextField::TiktokUrl, e.value()),
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle {
                        Icon { icon: LdClock, width: 18, height: 18 }
                        " Opening hours"
                    }
                }
                CardContent {
                    div { class: "hours-grid",
                        for (day, hours) in schedule {
                            div { key: "{day.key()}", class: "hours-row",
                                span { class: "hours-day", "{day.label()}" }
                                Input {
                                    input_type: "time",
                                    value: hours.open.clone(),
                                    required: !hours.closed,
                                    disabled: hours.closed,
                                    on_input: move |e: FormEvent| form.write().set_open(day, e.value()),
                                }
                                Input {
                                    input_type: "time",
                                    value: hours.close.clone(),
                                    required: !hours.closed,
                                    disabled: hours.closed,
                                    on_input: move |e: FormEvent| form.write().set_close(day, e.value()),
                                }
                                CheckboxField {
                                    label: "Closed",
                                    checked: hours.closed,
                                    on_change: move |closed: bool| form.write().set_closed(day, closed),
                                }
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle { "Payments & amenities" }
                }
                CardContent {
                    Field { label: "Payment Methods Accepted",
                        CheckboxGroup {
                            for method in PAYMENT_METHODS.iter().copied() {
                                CheckboxField {
                                    key: "{method}",
                                    label: "{method}",
                                    value: "{method}",
                                    checked: state.payment_methods().iter().any(|m| m == method),
                                    on_change: move |checked: bool| form.write().toggle_payment_method(method, checked),
                                }
                            }
                        }
                    }
                    Field { label: "Facilities",
                        CheckboxGroup {
                            for facility in FACILITIES.iter().copied() {
                                CheckboxField {
                                    key: "{facility}",
                                    label: "{facility}",
                                    value: "{facility}",
                                    checked: state.facilities().iter().any(|f| f == facility),
                                    on_change: move |checked: bool| form.write().toggle_facility(facility, checked),
                                }
                            }
                        }
                    }
                    Field { label: "Business Options",
                        CheckboxGroup {
                            for choice in BUSINESS_OPTIONS.iter().copied() {
                                CheckboxField {
                                    key: "{choice}",
                                    label: "{choice}",
                                    value: "{choice}",
                                    checked: state.options().iter().any(|o| o == choice),
                                    on_change: move |checked: bool| form.write().toggle_option(choice, checked),
                                }
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle {
                        Icon { icon: LdImage, width: 18, height: 18 }
                        " Photos"
                    }
                    CardDescription { "Up to 3 images, each smaller than 1MB." }
                }
                CardContent {
                    if !uploads_enabled {
                        p { class: "form-error", "File uploads are currently unavailable." }
                    }
                    if !existing_images.is_empty() {
                        div { class: "file-chips",
                            for url in existing_images {
                                FileChip {
                                    key: "{url}",
                                    label: url.rsplit('/').next().unwrap_or(&url).to_string(),
                                    on_remove: {
                                        let url = url.clone();
                                        move |_| uploads.write().remove_existing(&url)
                                    },
                                }
                            }
                        }
                    }
                    FileInput {
                        key: "{image_input_key}",
                        accept: PRODUCT_IMAGE_ACCEPT,
                        multiple: true,
                        disabled: remaining_slots == 0 || !uploads_enabled,
                        on_change: on_images,
                    }
                    if !new_images.is_empty() {
                        div { class: "file-chips",
                            for (index, name) in new_images {
                                FileChip {
                                    key: "{index}-{name}",
                                    label: name,
                                    on_remove: move |_| uploads.write().remove_new(index),
                                }
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle {
                        Icon { icon: LdCreditCard, width: 18, height: 18 }
                        " Plan & payment"
                    }
                }
                CardContent {
                    FormRow {
                        Field { label: "Listing Price", html_for: "listing-price",
                            Input {
                                id: "listing-price",
                                value: prices.listing.clone(),
                                placeholder: "Loading...",
                                readonly: true,
                            }
                        }
                        Field { label: "POS + Website Price", html_for: "addon-price",
                            Input {
                                id: "addon-price",
                                value: prices.addon.clone(),
                                placeholder: "Loading...",
                                readonly: true,
                            }
                        }
                    }
                    Field { label: "Add an online shop (POS + Website)?",
                        RadioGroup { label: "Online shop option",
                            RadioOption {
                                name: "online_shop_option",
                                value: OnlineShopOption::Sure.as_str(),
                                label: "Sure",
                                checked: state.online_shop_option == OnlineShopOption::Sure,
                                on_select: move |v: String| form.write().online_shop_option = OnlineShopOption::from_str_or_default(&v),
                            }
                            RadioOption {
                                name: "online_shop_option",
                                value: OnlineShopOption::NotNow.as_str(),
                                label: "Not now",
                                checked: state.online_shop_option == OnlineShopOption::NotNow,
                                on_select: move |v: String| form.write().online_shop_option = OnlineShopOption::from_str_or_default(&v),
                            }
                        }
                    }
                    Field { label: "Payment Option",
                        RadioGroup { label: "Payment option",
                            RadioOption {
                                name: "payment_option",
                                value: PaymentOption::Stripe.as_str(),
                                label: "Pay by card",
                                checked: state.payment_option == PaymentOption::Stripe,
                                on_select: move |v: String| form.write().payment_option = PaymentOption::from_str_or_default(&v),
                            }
                            RadioOption {
                                name: "payment_option",
                                value: PaymentOption::Bank.as_str(),
                                label: "Bank transfer",
                                checked: bank,
                                disabled: !uploads_enabled,
                                on_select: move |v: String| form.write().payment_option = PaymentOption::from_str_or_default(&v),
                            }
                        }
                    }
                    if !uploads_enabled {
                        p { class: "field-hint", "Bank transfer is unavailable while receipt uploads are disabled." }
                    }
                    if bank {
                        div { class: "bank-instructions",
                            p { "{settings.bank_instructions}" }
                            p { class: "bank-total", "Total: {total_display}" }
                        }
                        Field {
                            label: "Payment Receipt",
                            html_for: "receipt",
                            required: true,
                            hint: Some("Image or PDF, smaller than 1MB.".to_string()),
                            FileInput {
                                key: "{receipt_input_key}",
                                id: "receipt",
                                accept: RECEIPT_ACCEPT,
                                required: receipt_name.is_none(),
                                disabled: !uploads_enabled,
                                on_change: on_receipt,
                            }
                            if let Some(name) = receipt_name {
                                p { class: "receipt-selected", "Selected: {name}" }
                            }
                        }
                    }
                }
                CardFooter {
                    Button {
                        button_type: "submit",
                        busy: busy(),
                        "{submit_label}"
                    }
                }
            }
        }
    }
}
