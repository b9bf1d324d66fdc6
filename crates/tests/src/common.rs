use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use server::backend::ListingBackend;
use shared_types::{
    AuthUser, Business, BusinessPayload, FormState, LocationRecord, Plan, SelectedFile,
};
use uuid::Uuid;

/// One request the pipeline made against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Upload { key: String, content_type: String, size: u64 },
    Insert(BusinessPayload),
    Update(Uuid, BusinessPayload),
}

/// In-memory backend that records every call.
///
/// Failures are injected per operation; `fail_upload_containing` fails only
/// uploads whose key contains the given text.
#[derive(Default)]
pub struct MockBackend {
    pub plans: Vec<Plan>,
    pub locations: Vec<LocationRecord>,
    pub fail_reads: Option<String>,
    pub fail_upload_containing: Option<(String, String)>,
    pub fail_write: Option<String>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Upload { key, .. } => Some(key),
                _ => None,
            })
            .collect();
        keys.sort();
        keys
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Upload { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ListingBackend for MockBackend {
    async fn fetch_plans(&self) -> Result<Vec<Plan>, String> {
        match &self.fail_reads {
            Some(msg) => Err(msg.clone()),
            None => Ok(self.plans.clone()),
        }
    }

    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, String> {
        match &self.fail_reads {
            Some(msg) => Err(msg.clone()),
            None => Ok(self.locations.clone()),
        }
    }

    async fn upload_asset(&self, key: &str, file: &SelectedFile) -> Result<String, String> {
        self.record(Call::Upload {
            key: key.to_string(),
            content_type: file.content_type.clone(),
            size: file.size(),
        });
        if let Some((needle, msg)) = &self.fail_upload_containing {
            if key.contains(needle.as_str()) {
                return Err(msg.clone());
            }
        }
        Ok(asset_url(key))
    }

    async fn insert_business(&self, payload: BusinessPayload) -> Result<Business, String> {
        self.record(Call::Insert(payload.clone()));
        if let Some(msg) = &self.fail_write {
            return Err(msg.clone());
        }
        Ok(business_from_payload(Uuid::new_v4(), payload))
    }

    async fn update_business(&self, id: Uuid, payload: BusinessPayload) -> Result<Business, String> {
        self.record(Call::Update(id, payload.clone()));
        if let Some(msg) = &self.fail_write {
            return Err(msg.clone());
        }
        Ok(business_from_payload(id, payload))
    }
}

/// Stage of each call, in the order the backend saw them.
pub fn stages(calls: &[Call]) -> Vec<&'static str> {
    calls
        .iter()
        .map(|call| match call {
            Call::Upload { key, .. } if key.starts_with("products/") => "image",
            Call::Upload { .. } => "receipt",
            Call::Insert(_) => "insert",
            Call::Update(..) => "update",
        })
        .collect()
}

pub fn asset_url(key: &str) -> String {
    format!("https://assets.test/business-assets/{key}")
}

/// The row a backend would hand back after writing `payload`.
pub fn business_from_payload(id: Uuid, payload: BusinessPayload) -> Business {
    let now = fixed_now();
    Business {
        id,
        owner_id: payload.owner_id,
        name: payload.name,
        description: Some(payload.description),
        category: payload.category,
        phone: Some(payload.phone),
        address: Some(payload.address),
        towns: Some(payload.towns),
        province_district: Some(payload.province_district),
        zip_code: Some(payload.zip_code),
        website: Some(payload.website),
        information_website: payload.information_website,
        facebook_page: payload.facebook_page,
        tiktok_url: payload.tiktok_url,
        starting_price: payload.starting_price,
        number_of_fields: payload.number_of_fields,
        field_details: serde_json::to_value(&payload.field_details).ok(),
        payment_methods: payload.payment_methods,
        facilities: payload.facilities,
        business_options: payload.business_options,
        opening_hours: Some(payload.opening_hours),
        product_images: payload.product_images,
        receipt_url: payload.receipt_url,
        payment_status: Some(payload.payment_status),
        last_payment_date: payload.last_payment_date,
        pos_website: payload.pos_website,
        created_at: now,
        updated_at: now,
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

pub fn owner() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: "owner@example.com".to_string(),
        role: "authenticated".to_string(),
    }
}

/// A form with every required input filled in.
pub fn complete_form() -> FormState {
    let mut form = FormState::default();
    form.name = "Goal Arena".to_string();
    form.description = "Two floodlit indoor pitches".to_string();
    form.phone = "09 555 0101".to_string();
    form.website = "https://goal-arena.example".to_string();
    form
}

pub fn image(name: &str, size: usize) -> SelectedFile {
    SelectedFile::new(name, "image/jpeg", vec![7u8; size])
}

pub fn receipt(name: &str) -> SelectedFile {
    SelectedFile::new(name, "application/pdf", vec![1u8; 64])
}

pub fn location(name: &str, towns: &[&str]) -> LocationRecord {
    LocationRecord {
        id: Uuid::new_v4(),
        province_district: name.to_string(),
        towns: towns.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn plan(name: &str, pricing: &str, symbol: &str, duration: &str) -> Plan {
    Plan {
        name: Some(name.to_string()),
        pricing: Some(pricing.to_string()),
        currency_symbol: Some(symbol.to_string()),
        duration: Some(duration.to_string()),
    }
}
