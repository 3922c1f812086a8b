use dioxus::prelude::*;
use store::Role;

use crate::provider::use_auth;

/// Organization dashboard.
#[component]
pub fn OrgProfileView(
    on_created: EventHandler<()>,
    on_new: EventHandler<()>,
    on_edit: EventHandler<()>,
    on_login: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let user = auth.read().user.clone();

    let Some(user) = user.filter(|u| u.role() == Role::Organization) else {
        return rsx! {
            div {
                class: "page-narrow",
                h1 { "Organizations" }
                p { "Sign in with an organization account to manage your opportunities." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_login.call(()),
                    "Sign in"
                }
            }
        };
    };
    let bio = user
        .profile
        .as_ref()
        .and_then(|p| p.bio.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "page-narrow",
            h1 { "{user.display_name()}" }
            if !bio.is_empty() {
                p { "{bio}" }
            }
            div {
                class: "hero-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_created.call(()),
                    "My Opportunities"
                }
                button {
                    class: "btn",
                    onclick: move |_| on_new.call(()),
                    "New opportunity"
                }
                button {
                    class: "btn",
                    onclick: move |_| on_edit.call(()),
                    "Edit organization profile"
                }
            }
        }
    }
}
