use dioxus::prelude::*;

/// Neutral placeholder while something is being fetched or resolved.
#[component]
pub fn LoadingView() -> Element {
    rsx! {
        div {
            class: "loading",
            div { class: "spinner" }
            span { "Loading..." }
        }
    }
}
