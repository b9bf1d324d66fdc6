use dioxus::prelude::*;
use shared_types::{FeatureFlags, ListingSettings, LocationRecord, Plan};

/// Current feature flags. Not sensitive, no auth required.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Copy shown on the listing form.
#[server]
pub async fn get_listing_settings() -> Result<ListingSettings, ServerFnError> {
    Ok(crate::config::listing_settings())
}

/// Every pricing plan.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_plans() -> Result<Vec<Plan>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use crate::repo::plan;

    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    plan::list(pool).await.map_err(|e| e.into_server_fn_error())
}

/// Every location, ordered by province/district.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_locations() -> Result<Vec<LocationRecord>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use crate::repo::location;

    let pool = get_db().await.map_err(|e| e.into_server_fn_error())?;
    location::list(pool).await.map_err(|e| e.into_server_fn_error())
}
