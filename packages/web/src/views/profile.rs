use dioxus::prelude::*;
use store::Role;
use ui::profile_edit::{ProfileEditForm, ProfileKind};
use ui::views::ProfileView;
use ui::{use_auth, ProfileRoute, ProtectedRoute, RedirectTarget};

use super::redirect;
use crate::Route;

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();

    rsx! {
        ProtectedRoute {
            on_redirect: move |target: RedirectTarget| redirect(nav, target),
            ProfileView {
                on_edit: move |_| { nav.push(Route::EditProfile {}); },
                on_org_dashboard: move |_| { nav.push(Route::OrgProfile {}); },
                on_logged_out: move |_| { nav.replace(Route::Home {}); },
            }
        }
    }
}

#[component]
pub fn EditProfile() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let kind = ProfileKind::for_role(auth.read().role().unwrap_or(Role::Volunteer));

    rsx! {
        ProfileRoute {
            on_redirect: move |target: RedirectTarget| redirect(nav, target),
            ProfileEditForm {
                key: "{kind:?}",
                kind,
                on_saved: move |_| { nav.push(Route::after_profile_saved()); },
            }
        }
    }
}

/// `/edit-profile/*` renders the same form.
#[component]
pub fn EditProfileSection(rest: Vec<String>) -> Element {
    tracing::debug!("edit-profile suffix {rest:?}");
    rsx! { EditProfile {} }
}
