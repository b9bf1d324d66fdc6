use dioxus::prelude::*;

use crate::routes::business_form::BusinessForm;

#[component]
pub fn ListBusiness() -> Element {
    rsx! {
        div { class: "page",
            h1 { class: "page-title", "List your futsal court" }
            BusinessForm { existing: None, on_success: None }
        }
    }
}
