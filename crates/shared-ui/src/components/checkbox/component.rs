use dioxus::prelude::*;

/// A native checkbox with its label. `on_change` receives the new state.
#[component]
pub fn CheckboxField(
    label: String,
    #[props(default)] value: String,
    checked: bool,
    #[props(default = false)] disabled: bool,
    on_change: EventHandler<bool>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "checkbox-field",
            input {
                r#type: "checkbox",
                value: "{value}",
                checked: checked,
                disabled: disabled,
                onchange: move |evt| on_change.call(evt.checked()),
            }
            span { "{label}" }
        }
    }
}

/// A wrapping grid of checkboxes.
#[component]
pub fn CheckboxGroup(children: Element) -> Element {
    rsx! {
        div { class: "checkbox-group", role: "group", {children} }
    }
}
