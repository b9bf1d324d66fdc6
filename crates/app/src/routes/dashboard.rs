use dioxus::prelude::*;
use shared_types::{AppError, BusinessSummary};

use crate::routes::Route;

fn status_label(status: Option<&str>) -> &'static str {
    match status {
        Some("to_be_confirmed") | None => "Awaiting payment confirmation",
        Some("confirmed") => "Live",
        Some(_) => "Pending review",
    }
}

/// The signed-in owner's listings.
#[component]
pub fn Dashboard() -> Element {
    let listings = use_server_future(|| async move { server::api::list_my_businesses().await })?;
    let result = listings.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { class: "page-title", "My listings" }
                Link { to: Route::ListBusiness {}, class: "button", "data-style": "primary",
                    "Add listing"
                }
            }
            match result {
                Some(Ok(rows)) if rows.is_empty() => rsx! {
                    p { class: "page-empty", "You have not listed a business yet." }
                },
                Some(Ok(rows)) => rsx! {
                    ul { class: "listing-list",
                        for row in rows {
                            ListingRow { key: "{row.id}", row: row.clone() }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    p { class: "page-error", {AppError::friendly_message(&e.to_string())} }
                },
                None => rsx! {
                    p { class: "page-loading", "Loading..." }
                },
            }
        }
    }
}

#[component]
fn ListingRow(row: BusinessSummary) -> Element {
    let place = [row.towns.as_deref(), row.province_district.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let status = status_label(row.payment_status.as_deref());

    rsx! {
        li { class: "listing-row",
            div {
                p { class: "listing-name", "{row.name}" }
                if !place.is_empty() {
                    p { class: "listing-place", "{place}" }
                }
            }
            span { class: "listing-status", "{status}" }
            Link { to: Route::EditBusiness { id: row.id.clone() }, class: "listing-edit", "Edit" }
        }
    }
}
