use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Put your futsal court in front of players" }
            p { class: "hero-lead",
                "List your pitches, opening hours and prices in a few minutes. "
                "Listings go live once your payment is confirmed."
            }
            Link { to: Route::ListBusiness {}, class: "button", "data-style": "primary",
                "List your business"
            }
        }
    }
}
