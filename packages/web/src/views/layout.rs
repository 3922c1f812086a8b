use dioxus::prelude::*;
use store::Role;
use ui::{use_auth, PageChrome};

use crate::Route;

/// Shared layout wrapping every route.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let role = auth.read().role();

    rsx! {
        PageChrome {
            links: rsx! {
                Link { to: Route::Home {}, "Home" }
                Link { to: Route::Opportunities {}, "Opportunities" }
                match role {
                    None => rsx! {
                        Link { to: Route::Login {}, "Sign in" }
                        Link { to: Route::Registration {}, "Sign up" }
                    },
                    Some(Role::Volunteer) => rsx! {
                        Link { to: Route::Chat {}, "Chat" }
                        Link { to: Route::Profile {}, "Profile" }
                    },
                    Some(Role::Organization) => rsx! {
                        Link { to: Route::CreatedOpportunities {}, "My Opportunities" }
                        Link { to: Route::OrgChat {}, "Chat" }
                        Link { to: Route::OrgProfile {}, "Organization" }
                    },
                }
            },
            Outlet::<Route> {}
        }
    }
}
