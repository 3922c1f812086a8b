use dioxus::prelude::*;

use crate::provider::use_auth;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "navbar",
            {children}
        }
    }
}

/// Shared layout: the navigation bar and the page below it.
#[component]
pub fn PageChrome(links: Element, children: Element) -> Element {
    let auth = use_auth();
    let greeting = auth.read().user.as_ref().map(|user| user.display_name());

    rsx! {
        Navbar {
            span { class: "brand", "Volunteer Match" }
            nav { class: "nav-links", {links} }
            if let Some(name) = greeting {
                span { class: "nav-user", "{name}" }
            }
        }
        main {
            class: "content",
            {children}
        }
    }
}
