use dioxus::prelude::*;

use crate::provider::use_auth;

/// Start page.
#[component]
pub fn Landing(
    on_browse: EventHandler<()>,
    on_register: EventHandler<()>,
    on_register_org: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let signed_in = auth.read().is_authenticated();

    rsx! {
        section {
            class: "hero",
            h1 { "Find a cause worth your time" }
            p {
                class: "lead",
                "Volunteer Match connects people who want to help with organizations that need them."
            }
            div {
                class: "hero-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_browse.call(()),
                    "Browse opportunities"
                }
                if !signed_in {
                    button {
                        class: "btn",
                        onclick: move |_| on_register.call(()),
                        "Sign up to volunteer"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| on_register_org.call(()),
                        "Register an organization"
                    }
                }
            }
        }
    }
}
