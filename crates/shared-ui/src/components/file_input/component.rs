use dioxus::prelude::*;

/// A native file picker. The raw change event is handed to `on_change` so
/// the caller can read the picked files.
#[component]
pub fn FileInput(
    #[props(default)] accept: String,
    #[props(default = false)] multiple: bool,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
    on_change: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "file-input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        input {
            r#type: "file",
            accept: "{accept}",
            multiple: multiple,
            required: required,
            disabled: disabled,
            onchange: move |evt| on_change.call(evt),
            ..merged,
        }
    }
}

/// A removable chip for a picked or already-stored file.
#[component]
pub fn FileChip(label: String, on_remove: EventHandler<()>) -> Element {
    rsx! {
        span { class: "file-chip",
            span { class: "file-chip-name", "{label}" }
            button {
                r#type: "button",
                class: "file-chip-remove",
                "aria-label": "Remove {label}",
                onclick: move |_| on_remove.call(()),
                "×"
            }
        }
    }
}
