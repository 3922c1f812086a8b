use dioxus::prelude::*;
use ui::views::Landing;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        Landing {
            on_browse: move |_| { nav.push(Route::Opportunities {}); },
            on_register: move |_| { nav.push(Route::Registration {}); },
            on_register_org: move |_| { nav.push(Route::OrgRegistration {}); },
        }
    }
}
