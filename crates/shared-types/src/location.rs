use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A province/district and the towns inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct LocationRecord {
    pub id: Uuid,
    pub province_district: String,
    #[serde(default)]
    pub towns: Vec<String>,
}

/// Towns of the named province, or an empty slice when it is not loaded.
pub fn towns_for<'a>(locations: &'a [LocationRecord], province: &str) -> &'a [String] {
    locations
        .iter()
        .find(|l| l.province_district == province)
        .map(|l| l.towns.as_slice())
        .unwrap_or(&[])
}

fn picker_rank(name: &str) -> u8 {
    let lower = name.to_lowercase();
    if lower.contains("yangon") {
        0
    } else if lower.contains("mandalay") {
        1
    } else {
        2
    }
}

fn picker_order(a: &LocationRecord, b: &LocationRecord) -> Ordering {
    picker_rank(&a.province_district)
        .cmp(&picker_rank(&b.province_district))
        .then_with(|| {
            a.province_district
                .to_lowercase()
                .cmp(&b.province_district.to_lowercase())
        })
        .then_with(|| a.province_district.cmp(&b.province_district))
}

/// Order for the province selector: Yangon first, Mandalay second, then
/// alphabetical. Names may carry local-script suffixes, so matching is by
/// substring.
pub fn sorted_for_picker(locations: &[LocationRecord]) -> Vec<LocationRecord> {
    let mut sorted = locations.to_vec();
    sorted.sort_by(picker_order);
    sorted
}
