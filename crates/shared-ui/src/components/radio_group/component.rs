use dioxus::prelude::*;

/// Container for [`RadioOption`]s sharing one `name`.
#[component]
pub fn RadioGroup(
    #[props(default)] label: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "radio-group", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            role: "radiogroup",
            "aria-label": "{label}",
            ..merged,
            {children}
        }
    }
}

/// One native radio button. `on_select` fires with `value` when picked.
#[component]
pub fn RadioOption(
    name: String,
    value: String,
    label: String,
    checked: bool,
    #[props(default = false)] disabled: bool,
    on_select: EventHandler<String>,
) -> Element {
    let picked = value.clone();
    rsx! {
        label { class: "radio-option",
            input {
                r#type: "radio",
                name: "{name}",
                value: "{value}",
                checked: checked,
                disabled: disabled,
                onchange: move |_| on_select.call(picked.clone()),
            }
            span { "{label}" }
        }
    }
}
