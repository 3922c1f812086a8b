use dioxus::prelude::*;
use store::{Action, ChatTarget, Opportunity, PostSlot, Role};

use crate::applicants::load_opportunity;
use crate::icons::{FaArrowLeft, FaComments, FaUsers};
use crate::provider::{use_auth, use_current_post, use_services, use_store};
use crate::views::{LoadingView, NotFoundView};
use crate::Icon;

/// Points the chat view at the organization that owns `post`, or at the
/// configured counterpart when the post has no owner.
pub fn ask_about(post: &Opportunity) -> Action {
    match ChatTarget::for_owner(post) {
        Some(target) => Action::ChatTargetSelected(target),
        None => Action::ChatTargetCleared,
    }
}

/// Public page of one opportunity.
#[component]
pub fn OpportunityDetail(
    id: i64,
    on_back: EventHandler<()>,
    on_applicants: EventHandler<i64>,
    on_chat: EventHandler<()>,
) -> Element {
    let services = use_services();
    let store = use_store();
    let auth = use_auth();
    let current = use_current_post();

    let backend = services.backend.clone();
    let _ = use_resource(use_reactive!(|(id,)| {
        let backend = backend.clone();
        async move {
            load_opportunity(&backend, id, |a| store.dispatch(a)).await;
        }
    }));

    use_drop(move || store.dispatch(Action::CurrentPostCleared));

    let post = match &*current.read() {
        PostSlot::Loaded(post) if post.is_complete() => post.clone(),
        PostSlot::Loaded(_) | PostSlot::Missing { .. } => {
            return rsx! {
                NotFoundView { message: "This opportunity does not exist or has been removed." }
            };
        }
        PostSlot::Failed { error, .. } => {
            return rsx! { div { class: "form-alert", "Could not load this opportunity: {error}" } };
        }
        PostSlot::Empty | PostSlot::Loading { .. } => return rsx! { LoadingView {} },
    };

    let viewer = auth.read().user.clone();
    let is_owner = viewer.as_ref().is_some_and(|u| post.owner == Some(u.id));
    let is_volunteer = viewer.as_ref().is_some_and(|u| u.role() == Role::Volunteer);
    let question = ask_about(&post);

    rsx! {
        div {
            class: "page",
            button {
                class: "btn btn-link",
                onclick: move |_| on_back.call(()),
                Icon { icon: FaArrowLeft, width: 14, height: 14 }
                " All opportunities"
            }
            article {
                class: "card opportunity-detail",
                h1 { "{post.title}" }
                if let Some(location) = &post.location {
                    p { class: "muted", "{location}" }
                }
                p { "{post.description}" }
                p { class: "muted", "{post.applicants.len()} applicant(s)" }
            }
            div {
                class: "hero-actions",
                if is_owner {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_applicants.call(id),
                        Icon { icon: FaUsers, width: 14, height: 14 }
                        " View applicants"
                    }
                }
                if is_volunteer {
                    button {
                        class: "btn",
                        onclick: move |_| {
                            store.dispatch(question.clone());
                            on_chat.call(());
                        },
                        Icon { icon: FaComments, width: 14, height: 14 }
                        " Ask a question"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_goes_to_the_owning_organization() {
        let mut post = Opportunity {
            id: 4,
            title: "Food bank".to_string(),
            owner: Some(21),
            ..Opportunity::default()
        };
        match ask_about(&post) {
            Action::ChatTargetSelected(target) => {
                assert_eq!(target.id, "user-21");
                assert_eq!(target.role, Role::Organization);
            }
            other => panic!("unexpected {other:?}"),
        }

        post.owner = None;
        assert_eq!(ask_about(&post), Action::ChatTargetCleared);
    }
}
