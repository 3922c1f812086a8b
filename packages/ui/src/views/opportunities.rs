use api::Backend;
use dioxus::prelude::*;
use store::Opportunity;

use crate::icons::FaLocationDot;
use crate::provider::use_services;
use crate::views::LoadingView;
use crate::Icon;

/// Paginated list of open opportunities, newest first.
#[component]
pub fn OpportunityList(on_open: EventHandler<i64>) -> Element {
    let services = use_services();
    let page_size = services.config.posts.page_size.max(1);
    let mut page = use_signal(|| 0u32);

    let posts = use_resource(move || {
        let backend = services.backend.clone();
        let offset = page() * page_size;
        async move { backend.list_posts(offset, page_size).await }
    });

    let body = match &*posts.read() {
        None => rsx! { LoadingView {} },
        Some(Err(e)) => {
            tracing::error!("Failed to list opportunities: {e}");
            rsx! { div { class: "form-alert", "{e.user_message()}" } }
        }
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "muted", "No opportunities here yet." }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "opportunity-grid",
                for post in list.iter().cloned() {
                    OpportunityCard { key: "{post.id}", post, on_open }
                }
            }
        },
    };
    let has_next = matches!(&*posts.read(), Some(Ok(list)) if list.len() as u32 == page_size);

    rsx! {
        div {
            class: "page",
            h1 { "Opportunities" }
            {body}
            div {
                class: "pager",
                button {
                    class: "btn",
                    disabled: page() == 0,
                    onclick: move |_| page.set(page().saturating_sub(1)),
                    "Previous"
                }
                span { class: "muted", "Page {page() + 1}" }
                button {
                    class: "btn",
                    disabled: !has_next,
                    onclick: move |_| page.set(page() + 1),
                    "Next"
                }
            }
        }
    }
}

#[component]
pub fn OpportunityCard(post: Opportunity, on_open: EventHandler<i64>) -> Element {
    let id = post.id;
    rsx! {
        div {
            class: "card opportunity",
            onclick: move |_| on_open.call(id),
            h3 { "{post.title}" }
            if let Some(location) = &post.location {
                p {
                    class: "muted",
                    Icon { icon: FaLocationDot, width: 12, height: 12 }
                    " {location}"
                }
            }
            p { class: "excerpt", "{post.description}" }
        }
    }
}
