use dioxus::prelude::*;

/// Labelled input bound to one draft field, with its inline error message.
#[component]
pub fn FormField(
    name: String,
    label: String,
    value: String,
    invalid: bool,
    #[props(default = "This field is invalid.".to_string())] hint: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] multiline: bool,
    oninput: EventHandler<String>,
) -> Element {
    let class = if invalid { "form-control is-invalid" } else { "form-control" };

    rsx! {
        div {
            class: "form-group",
            label { r#for: "{name}", "{label}" }
            if multiline {
                textarea {
                    id: "{name}",
                    name: "{name}",
                    class,
                    rows: 4,
                    value: "{value}",
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
            } else {
                input {
                    id: "{name}",
                    name: "{name}",
                    class,
                    r#type: "{input_type}",
                    value: "{value}",
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
            }
            if invalid {
                div { class: "invalid-feedback", "{hint}" }
            }
        }
    }
}
