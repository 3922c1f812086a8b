use dioxus::prelude::*;

#[component]
pub fn NotFoundView(
    #[props(into, default = "We could not find the page you were looking for.".to_string())]
    message: String,
    on_home: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div {
            class: "page not-found",
            h1 { "Not found" }
            p { "{message}" }
            if let Some(on_home) = on_home {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_home.call(()),
                    "Back to the start page"
                }
            }
        }
    }
}
