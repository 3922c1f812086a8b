use dioxus::prelude::*;
use store::Opportunity;
use ui::views::{CreateOpportunityForm, OpportunityDetail, OpportunityList};
use ui::{OpportunityApplicantsView, OrgRoute, RedirectTarget};

use super::redirect;
use crate::Route;

#[component]
pub fn Opportunities() -> Element {
    let nav = use_navigator();

    rsx! {
        OpportunityList {
            on_open: move |id: i64| { nav.push(Route::OpportunityPage { id }); },
        }
    }
}

#[component]
pub fn NewOpportunity() -> Element {
    let nav = use_navigator();

    rsx! {
        OrgRoute {
            on_redirect: move |target: RedirectTarget| redirect(nav, target),
            CreateOpportunityForm {
                on_created: move |post: Opportunity| {
                    nav.replace(Route::OpportunityPage { id: post.id });
                },
            }
        }
    }
}

#[component]
pub fn OpportunityPage(id: i64) -> Element {
    let nav = use_navigator();

    rsx! {
        OpportunityDetail {
            id,
            on_back: move |_| { nav.push(Route::Opportunities {}); },
            on_applicants: move |id: i64| { nav.push(Route::Applicants { id }); },
            on_chat: move |_| { nav.push(Route::Chat {}); },
        }
    }
}

#[component]
pub fn Applicants(id: i64) -> Element {
    let nav = use_navigator();

    rsx! {
        OrgRoute {
            on_redirect: move |target: RedirectTarget| redirect(nav, target),
            OpportunityApplicantsView {
                id,
                on_my_opportunities: move |_| { nav.push(Route::CreatedOpportunitiesReturn {}); },
                on_chat: move |_| { nav.push(Route::OrgChat {}); },
                on_removed: move |_| { nav.replace(Route::CreatedOpportunitiesReturn {}); },
            }
        }
    }
}
