//! Login and registration pages.

use dioxus::prelude::*;
use store::{Role, User};
use ui::views::{LoginView, RegistrationView};

use crate::Route;

fn home_for(user: &User) -> Route {
    match user.role() {
        Role::Volunteer => Route::Profile {},
        Role::Organization => Route::OrgProfile {},
    }
}

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_logged_in: move |user: User| { nav.replace(home_for(&user)); },
            on_register: move |_| { nav.push(Route::Registration {}); },
        }
    }
}

#[component]
pub fn Registration() -> Element {
    let nav = use_navigator();

    rsx! {
        RegistrationView {
            role: Role::Volunteer,
            on_registered: move |_| { nav.replace(Route::EditProfile {}); },
            on_login: move |_| { nav.push(Route::Login {}); },
        }
    }
}

#[component]
pub fn OrgRegistration() -> Element {
    let nav = use_navigator();

    rsx! {
        RegistrationView {
            role: Role::Organization,
            on_registered: move |_| { nav.replace(Route::EditProfile {}); },
            on_login: move |_| { nav.push(Route::Login {}); },
        }
    }
}
