use std::collections::HashSet;

use api::{ApiError, Backend};
use dioxus::prelude::*;
use store::Opportunity;

use crate::icons::FaPlus;
use crate::provider::{use_auth, use_services};
use crate::views::{LoadingView, OpportunityCard};
use crate::Icon;

const MAX_PAGES: u32 = 200;

/// Every opportunity owned by `owner`, walking the paginated list.
///
/// Stops at a short page, at a page with no unseen posts, or after
/// [`MAX_PAGES`] pages.
pub async fn created_by<B: Backend>(
    backend: &B,
    owner: i64,
    page_size: u32,
) -> Result<Vec<Opportunity>, ApiError> {
    let page_size = page_size.max(1);
    let mut seen = HashSet::new();
    let mut owned = Vec::new();
    for page_index in 0..MAX_PAGES {
        let page = backend.list_posts(page_index * page_size, page_size).await?;
        let short = (page.len() as u32) < page_size;
        let mut fresh = false;
        for post in page {
            if !seen.insert(post.id) {
                continue;
            }
            fresh = true;
            if post.owner == Some(owner) {
                owned.push(post);
            }
        }
        if short || !fresh {
            return Ok(owned);
        }
    }
    tracing::warn!("Stopped listing opportunities after {MAX_PAGES} pages");
    Ok(owned)
}

/// The signed-in organization's opportunities. Selecting one opens its applicants.
#[component]
pub fn CreatedOpportunitiesView(on_open_applicants: EventHandler<i64>, on_new: EventHandler<()>) -> Element {
    let services = use_services();
    let auth = use_auth();

    let posts = use_resource(move || {
        let backend = services.backend.clone();
        let page_size = services.config.posts.page_size.max(10);
        let owner = auth.read().user.as_ref().map(|u| u.id);
        async move {
            match owner {
                Some(owner) => created_by(&backend, owner, page_size).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let body = match &*posts.read() {
        None => rsx! { LoadingView {} },
        Some(Ok(None)) => rsx! { p { class: "muted", "Sign in as an organization to see your opportunities." } },
        Some(Ok(Some(list))) if list.is_empty() => rsx! {
            p { class: "muted", "You have not published any opportunities yet." }
        },
        Some(Ok(Some(list))) => rsx! {
            div {
                class: "opportunity-grid",
                for post in list.iter().cloned() {
                    OpportunityCard { key: "{post.id}", post, on_open: on_open_applicants }
                }
            }
        },
        Some(Err(e)) => {
            tracing::error!("Failed to load created opportunities: {e}");
            rsx! { div { class: "form-alert", "{e.user_message()}" } }
        }
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "My Opportunities" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_new.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New opportunity"
                }
            }
            {body}
        }
    }
}
