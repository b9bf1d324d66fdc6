//! The seam between the listing form and the backend it talks to.

use base64::Engine;
use shared_types::{AppError, Business, BusinessPayload, LocationRecord, Plan, SelectedFile};
use uuid::Uuid;

/// Reads and writes the listing form needs from its backend.
///
/// Errors are user-facing messages; an empty message means the backend gave
/// no detail.
#[allow(async_fn_in_trait)]
pub trait ListingBackend {
    async fn fetch_plans(&self) -> Result<Vec<Plan>, String>;

    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, String>;

    /// Store a file under `key` and return its public URL.
    async fn upload_asset(&self, key: &str, file: &SelectedFile) -> Result<String, String>;

    async fn insert_business(&self, payload: BusinessPayload) -> Result<Business, String>;

    async fn update_business(&self, id: Uuid, payload: BusinessPayload) -> Result<Business, String>;
}

/// Backend reached through this crate's server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFnBackend;

fn backend_message(err: dioxus::prelude::ServerFnError) -> String {
    let raw = err.to_string();
    AppError::from_server_error(&raw)
        .map(|e| e.message)
        .unwrap_or(raw)
}

impl ListingBackend for ServerFnBackend {
    async fn fetch_plans(&self) -> Result<Vec<Plan>, String> {
        crate::api::list_plans().await.map_err(backend_message)
    }

    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, String> {
        crate::api::list_locations().await.map_err(backend_message)
    }

    async fn upload_asset(&self, key: &str, file: &SelectedFile) -> Result<String, String> {
        let data = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        crate::api::upload_listing_asset(key.to_string(), file.content_type.clone(), data)
            .await
            .map_err(backend_message)
    }

    async fn insert_business(&self, payload: BusinessPayload) -> Result<Business, String> {
        crate::api::create_business(payload)
            .await
            .map_err(backend_message)
    }

    async fn update_business(&self, id: Uuid, payload: BusinessPayload) -> Result<Business, String> {
        crate::api::update_business(id.to_string(), payload)
            .await
            .map_err(backend_message)
    }
}
