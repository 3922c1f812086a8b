use dioxus::prelude::*;
use ui::views::{CreatedOpportunitiesView, LoadingView, OrgProfileView};

use crate::Route;

#[component]
pub fn OrgProfile() -> Element {
    let nav = use_navigator();

    rsx! {
        OrgProfileView {
            on_created: move |_| { nav.push(Route::CreatedOpportunities {}); },
            on_new: move |_| { nav.push(Route::NewOpportunity {}); },
            on_edit: move |_| { nav.push(Route::EditProfile {}); },
            on_login: move |_| { nav.push(Route::Login {}); },
        }
    }
}

#[component]
pub fn CreatedOpportunities() -> Element {
    let nav = use_navigator();

    rsx! {
        CreatedOpportunitiesView {
            on_open_applicants: move |id: i64| { nav.push(Route::Applicants { id }); },
            on_new: move |_| { nav.push(Route::NewOpportunity {}); },
        }
    }
}

/// Where the applicants view returns to.
#[component]
pub fn CreatedOpportunitiesReturn() -> Element {
    rsx! { CreatedOpportunities {} }
}

/// Old links used a zero in place of the "O".
#[component]
pub fn LegacyCreatedOpportunities() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::CreatedOpportunities {});
    });
    rsx! { LoadingView {} }
}
