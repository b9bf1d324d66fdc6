use dioxus::prelude::*;

/// A native `<select>`.
///
/// Children should be `option { value: "...", "Label" }` elements. When
/// `placeholder` is set a disabled empty option is rendered first, so a
/// `required` select stays invalid until the user picks something.
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form-select", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        select {
            value: value.clone(),
            required: required,
            disabled: disabled,
            onchange: move |evt| onchange.call(evt),
            ..merged,
            if !placeholder.is_empty() {
                option { value: "", disabled: true, selected: value.is_empty(), "{placeholder}" }
            }
            {children}
        }
    }
}
