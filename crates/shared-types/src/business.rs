use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::form::FieldDetail;

/// Payment status recorded whenever a new receipt is uploaded.
pub const PAYMENT_STATUS_TO_BE_CONFIRMED: &str = "to_be_confirmed";

/// A stored business listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub towns: Option<String>,
    pub province_district: Option<String>,
    pub zip_code: Option<String>,
    pub website: Option<String>,
    pub information_website: Option<String>,
    pub facebook_page: Option<String>,
    pub tiktok_url: Option<String>,
    pub starting_price: Option<String>,
    pub number_of_fields: i32,
    /// JSON array of `{name, price}` objects.
    pub field_details: Option<serde_json::Value>,
    pub payment_methods: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub business_options: Option<Vec<String>>,
    /// JSON-encoded weekly schedule.
    pub opening_hours: Option<String>,
    pub product_images: Option<Vec<String>>,
    pub receipt_url: Option<String>,
    pub payment_status: Option<String>,
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(rename = "POS+Website")]
    #[cfg_attr(feature = "server", sqlx(rename = "POS+Website"))]
    pub pos_website: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert or update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct BusinessPayload {
    pub owner_id: Uuid,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Business name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Description is required"))
    )]
    pub description: String,
    pub category: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Phone is required"))
    )]
    pub phone: String,
    pub address: String,
    pub towns: String,
    pub province_district: String,
    pub zip_code: String,
    pub website: String,
    pub information_website: Option<String>,
    pub facebook_page: Option<String>,
    pub tiktok_url: Option<String>,
    pub starting_price: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 5, message = "Number of fields must be between 1 and 5"))
    )]
    pub number_of_fields: i32,
    pub field_details: Vec<FieldDetail>,
    pub payment_methods: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub business_options: Option<Vec<String>>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, message = "Opening hours are required"))
    )]
    pub opening_hours: String,
    pub product_images: Option<Vec<String>>,
    pub receipt_url: Option<String>,
    pub payment_status: String,
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(rename = "POS+Website")]
    pub pos_website: i32,
}

/// Compact row for the owner's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessSummary {
    pub id: String,
    pub name: String,
    pub province_district: Option<String>,
    pub towns: Option<String>,
    pub payment_status: Option<String>,
    pub updated_at: String,
}

impl From<Business> for BusinessSummary {
    fn from(b: Business) -> Self {
        Self {
            id: b.id.to_string(),
            name: b.name,
            province_district: b.province_district,
            towns: b.towns,
            payment_status: b.payment_status,
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// `None` for an empty list, matching the nullable array columns.
pub fn non_empty_list(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// `None` for an empty string.
pub fn non_empty_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
