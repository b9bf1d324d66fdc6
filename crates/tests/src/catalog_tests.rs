use pretty_assertions::assert_eq;
use server::catalog::{load_locations, load_plan_prices};
use shared_types::{FormState, PlanPrices};

use crate::common::{business_from_payload, complete_form, location, owner, plan, MockBackend};

#[tokio::test]
async fn plan_prices_pick_listing_and_addon_plans() {
    let backend = MockBackend {
        plans: vec![
            plan("Gold Membership", "99", "$", "/yr"),
            plan("Listing Plan", "10", "$", "/mo"),
            plan("Website + POS", "20", "$", "/mo"),
        ],
        ..MockBackend::new()
    };

    let prices = load_plan_prices(&backend).await;
    assert_eq!(
        prices,
        PlanPrices {
            listing: "$10/mo".to_string(),
            addon: "$20/mo".to_string(),
        }
    );
}

#[tokio::test]
async fn plan_read_failure_leaves_displays_empty() {
    let backend = MockBackend {
        plans: vec![plan("Listing Plan", "10", "$", "/mo")],
        fail_reads: Some("permission denied for table plans".to_string()),
        ..MockBackend::new()
    };

    assert_eq!(load_plan_prices(&backend).await, PlanPrices::default());
}

#[tokio::test]
async fn no_matching_plan_gives_empty_display() {
    let backend = MockBackend {
        plans: vec![plan("Odoo Suite", "30", "€", "/yr")],
        ..MockBackend::new()
    };

    let prices = load_plan_prices(&backend).await;
    assert_eq!(prices.listing, "");
    assert_eq!(prices.addon, "€30/yr");
}

#[tokio::test]
async fn locations_come_back_in_picker_order() {
    let backend = MockBackend {
        locations: vec![
            location("Ayeyarwady", &["Pathein"]),
            location("Bago", &["Taungoo"]),
            location("Mandalay", &["Chanayethazan"]),
            location("Yangon", &["Bahan", "Hlaing"]),
        ],
        ..MockBackend::new()
    };

    let names: Vec<String> = load_locations(&backend)
        .await
        .into_iter()
        .map(|l| l.province_district)
        .collect();
    assert_eq!(names, vec!["Yangon", "Mandalay", "Ayeyarwady", "Bago"]);
}

#[tokio::test]
async fn location_read_failure_gives_empty_list() {
    let backend = MockBackend {
        locations: vec![location("Yangon", &["Bahan"])],
        fail_reads: Some("network error".to_string()),
        ..MockBackend::new()
    };

    assert!(load_locations(&backend).await.is_empty());
}

#[tokio::test]
async fn province_selection_uses_loaded_towns() {
    let backend = MockBackend {
        locations: vec![
            location("Yangon", &["Bahan", "Hlaing"]),
            location("Bago", &["Taungoo"]),
        ],
        ..MockBackend::new()
    };
    let locations = load_locations(&backend).await;

    let mut form = FormState::default();
    form.select_province("Yangon", &locations);
    form.set_town("Hlaing");
    assert_eq!(form.town(), "Hlaing");

    form.select_province("Bago", &locations);
    assert_eq!(form.town(), "");
    assert_eq!(form.available_towns(), &["Taungoo".to_string()]);

    form.select_province("Shan", &locations);
    assert!(form.available_towns().is_empty());
}

#[tokio::test]
async fn edit_mode_seeds_towns_without_clearing_town() {
    let backend = MockBackend {
        locations: vec![location("Yangon", &["Bahan", "Hlaing"])],
        ..MockBackend::new()
    };

    let mut source = complete_form();
    source.select_province("Yangon", &backend.locations);
    source.set_town("Bahan");
    let payload = server::submission::assemble_payload(
        &owner(),
        &source,
        vec![],
        server::submission::PaymentRecord::carried_over(None),
    );
    let record = business_from_payload(uuid::Uuid::new_v4(), payload);

    let mut form = FormState::from_business(&record);
    assert!(form.available_towns().is_empty());

    let locations = load_locations(&backend).await;
    form.seed_towns(&locations);
    assert_eq!(form.province_district(), "Yangon");
    assert_eq!(form.town(), "Bahan");
    assert_eq!(form.available_towns().len(), 2);
}
