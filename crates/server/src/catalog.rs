//! Reference data loaded when the form mounts. Failures are logged and
//! degrade to empty values; nothing is retried or shown to the user.

use shared_types::{sorted_for_picker, LocationRecord, PlanPrices};

use crate::backend::ListingBackend;

/// Listing and add-on price displays. Empty strings when the plans cannot be
/// read or no plan matches.
pub async fn load_plan_prices(backend: &impl ListingBackend) -> PlanPrices {
    match backend.fetch_plans().await {
        Ok(plans) => PlanPrices::from_plans(&plans),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching plans");
            PlanPrices::default()
        }
    }
}

/// Locations in province picker order, or empty on failure.
pub async fn load_locations(backend: &impl ListingBackend) -> Vec<LocationRecord> {
    match backend.fetch_locations().await {
        Ok(locations) => sorted_for_picker(&locations),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching locations");
            Vec::new()
        }
    }
}
