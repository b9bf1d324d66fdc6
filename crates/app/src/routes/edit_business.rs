use dioxus::prelude::*;
use shared_types::AppError;

use crate::routes::business_form::BusinessForm;
use crate::routes::Route;

/// Loads one of the caller's listings and opens it in the form.
#[component]
pub fn EditBusiness(id: String) -> Element {
    let record = use_server_future(move || {
        let id = id.clone();
        async move { server::api::get_business(id).await }
    })?;

    let result = record.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            h1 { class: "page-title", "Edit listing" }
            match result {
                Some(Ok(business)) => rsx! {
                    BusinessForm { key: "{business.id}", existing: Some(business), on_success: None }
                },
                Some(Err(e)) => rsx! {
                    div { class: "page-error",
                        p { {AppError::friendly_message(&e.to_string())} }
                        Link { to: Route::Dashboard {}, "Back to my listings" }
                    }
                },
                None => rsx! {
                    p { class: "page-loading", "Loading..." }
                },
            }
        }
    }
}
