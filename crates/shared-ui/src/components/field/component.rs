use dioxus::prelude::*;

/// Label, control and optional hint stacked vertically.
///
/// Required fields get a trailing asterisk on the label.
#[component]
pub fn Field(
    #[props(default)] label: String,
    /// `id` of the control the label points at.
    #[props(default)]
    html_for: String,
    #[props(default = false)] required: bool,
    #[props(default)] hint: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "field",
            if !label.is_empty() {
                label { class: "field-label", r#for: "{html_for}",
                    "{label}"
                    if required {
                        span { class: "field-required", " *" }
                    }
                }
            }
            {children}
            if let Some(hint) = hint {
                p { class: "field-hint", "{hint}" }
            }
        }
    }
}
