use dioxus::prelude::*;
use store::Role;

use crate::auth::LogoutButton;
use crate::provider::use_auth;

/// The signed-in account's own profile.
#[component]
pub fn ProfileView(
    on_edit: EventHandler<()>,
    on_org_dashboard: EventHandler<()>,
    on_logged_out: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let Some(user) = auth.read().user.clone() else {
        return rsx! {};
    };
    let profile = user.profile.clone().unwrap_or_default();
    let detail = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("Not set")
            .to_string()
    };

    rsx! {
        div {
            class: "page-narrow",
            div {
                class: "profile-header",
                div { class: "avatar avatar-large", "{profile.initials()}" }
                div {
                    h1 { "{user.display_name()}" }
                    p { class: "muted", "{user.role().label()} · {user.email}" }
                }
            }
            dl {
                class: "profile-details",
                if user.role() == Role::Organization {
                    dt { "Organization" }
                    dd { "{detail(&profile.org_name)}" }
                }
                dt { "First name" }
                dd { "{detail(&profile.first)}" }
                dt { "Last name" }
                dd { "{detail(&profile.last)}" }
                dt { "Phone" }
                dd { "{detail(&profile.phone)}" }
                dt { "About" }
                dd { "{detail(&profile.bio)}" }
            }
            div {
                class: "hero-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_edit.call(()),
                    "Edit profile"
                }
                if user.role() == Role::Organization {
                    button {
                        class: "btn",
                        onclick: move |_| on_org_dashboard.call(()),
                        "Organization dashboard"
                    }
                }
                LogoutButton { class: "btn", on_logged_out }
            }
        }
    }
}
