//! Applicants of one opportunity, as seen by the organization that owns it.
//!
//! The view fetches the opportunity into the store's current-post slot, then
//! the profile of every applicant listed on it. Until the organization has
//! reviewed the opportunity (followed "My Opportunities" from here once) only
//! the manage panel is shown; afterwards the applicant cards with
//! accept, reject and chat actions.

use std::collections::BTreeMap;

use api::{ApiError, Backend};
use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use store::review::mark_reviewed;
use store::{Action, ChatTarget, Opportunity, PostSlot, Profile, ReviewLedger};
use tracing::{error, warn};

use crate::icons::{FaArrowLeft, FaCheck, FaComments, FaTrash, FaXmark};
use crate::provider::{use_current_post, use_services, use_store};
use crate::views::{LoadingView, NotFoundView};
use crate::Icon;

/// What the applicants view shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ApplicantsPhase {
    Loading,
    NotFound,
    /// Not reviewed yet: manage panel only.
    Gated(Opportunity),
    Full(Opportunity),
}

/// Derives the phase from the current-post slot and the review mark.
///
/// A failed fetch stays `Loading`; the failure is logged where it happened.
pub fn applicants_phase(slot: &PostSlot, reviewed: bool) -> ApplicantsPhase {
    match slot {
        PostSlot::Empty | PostSlot::Loading { .. } | PostSlot::Failed { .. } => {
            ApplicantsPhase::Loading
        }
        PostSlot::Missing { .. } => ApplicantsPhase::NotFound,
        PostSlot::Loaded(post) if !post.is_complete() => ApplicantsPhase::NotFound,
        PostSlot::Loaded(post) if reviewed => ApplicantsPhase::Full(post.clone()),
        PostSlot::Loaded(post) => ApplicantsPhase::Gated(post.clone()),
    }
}

/// Fetches one opportunity into the current-post slot.
pub async fn load_opportunity<B: Backend>(
    backend: &B,
    id: i64,
    mut dispatch: impl FnMut(Action),
) -> Option<Opportunity> {
    dispatch(Action::PostRequested(id));
    match backend.fetch_post(id).await {
        Ok(post) => {
            dispatch(Action::PostLoaded(post.clone()));
            Some(post)
        }
        Err(ApiError::NotFound) => {
            warn!("Opportunity {id} does not exist");
            dispatch(Action::PostMissing(id));
            None
        }
        Err(e) => {
            error!("Failed to fetch opportunity {id}: {e}");
            dispatch(Action::PostFailed {
                id,
                error: e.to_string(),
            });
            None
        }
    }
}

/// Fetches the profile of every applicant of `post`. Failures are skipped.
pub async fn load_applicants<B: Backend>(
    backend: &B,
    post: &Opportunity,
    mut dispatch: impl FnMut(Action),
) -> Vec<Profile> {
    let mut profiles = Vec::with_capacity(post.applicants.len());
    for &profile_id in &post.applicants {
        match backend.fetch_profile(profile_id).await {
            Ok(profile) => {
                dispatch(Action::ProfileLoaded(profile.clone()));
                profiles.push(profile);
            }
            Err(e) => warn!("Skipping applicant {profile_id} of post {}: {e}", post.id),
        }
    }
    profiles
}

/// Accept/reject state of one applicant card. Kept in the view only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplicantDecision {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

#[component]
pub fn OpportunityApplicantsView(
    id: i64,
    on_my_opportunities: EventHandler<()>,
    on_chat: EventHandler<()>,
    on_removed: EventHandler<()>,
) -> Element {
    let services = use_services();
    let store = use_store();
    let current = use_current_post();
    let toasts = use_toast();
    let ledger = use_signal({
        let storage = services.storage.clone();
        move || ReviewLedger::load(&storage)
    });
    let mut decisions = use_signal(BTreeMap::<i64, ApplicantDecision>::new);
    let mut removing = use_signal(|| false);

    let backend = services.backend.clone();
    let _ = use_resource(use_reactive!(|(id,)| {
        let backend = backend.clone();
        async move {
            if let Some(post) = load_opportunity(&backend, id, |a| store.dispatch(a)).await {
                load_applicants(&backend, &post, |a| store.dispatch(a)).await;
            }
        }
    }));

    use_drop(move || store.dispatch(Action::CurrentPostCleared));

    let phase = applicants_phase(&current.read(), ledger.read().is_reviewed(id));

    let storage = services.storage.clone();
    let open_my_opportunities = move |_: MouseEvent| {
        mark_reviewed(&storage, id);
        on_my_opportunities.call(());
    };

    let remove = {
        let services = services.clone();
        move |_: MouseEvent| {
            let services = services.clone();
            spawn(async move {
                let Some(token) = services.token() else {
                    warn!("Remove requested without a session");
                    return;
                };
                removing.set(true);
                match services.backend.delete_post(&token, id).await {
                    Ok(()) => {
                        store.dispatch(Action::PostDeleted(id));
                        toasts.success("Opportunity removed".to_string(), ToastOptions::new());
                        on_removed.call(());
                    }
                    Err(e) => {
                        error!("Failed to delete opportunity {id}: {e}");
                        removing.set(false);
                        toasts.error(
                            "Could not remove opportunity".to_string(),
                            ToastOptions::new().description(e.user_message()),
                        );
                    }
                }
            });
        }
    };

    match phase {
        ApplicantsPhase::Loading => rsx! { LoadingView {} },
        ApplicantsPhase::NotFound => rsx! {
            NotFoundView { message: "This opportunity does not exist or has been removed." }
        },
        ApplicantsPhase::Gated(post) => rsx! {
            div {
                class: "page",
                button {
                    class: "btn btn-link",
                    onclick: open_my_opportunities,
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    " My Opportunities"
                }
                div {
                    class: "card manage-panel",
                    h2 { "Manage opportunity" }
                    h3 { "{post.title}" }
                    if let Some(location) = &post.location {
                        p { class: "muted", "{location}" }
                    }
                    p { "{post.description}" }
                    p {
                        class: "muted",
                        "{post.applicants.len()} applicant(s) so far."
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: removing(),
                        onclick: remove,
                        Icon { icon: FaTrash, width: 14, height: 14 }
                        if removing() { " Removing..." } else { " Remove opportunity" }
                    }
                }
            }
        },
        ApplicantsPhase::Full(post) => {
            let state = store.state();
            let profiles: Vec<Profile> = post
                .applicants
                .iter()
                .filter_map(|pid| state.read().profiles.get(pid).cloned())
                .collect();
            rsx! {
                div {
                    class: "page",
                    button {
                        class: "btn btn-link",
                        onclick: open_my_opportunities,
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        " My Opportunities"
                    }
                    h1 { "Applicants for {post.title}" }
                    if profiles.is_empty() {
                        p { class: "muted", "Nobody has applied yet." }
                    }
                    div {
                        class: "applicant-grid",
                        for profile in profiles {
                            ApplicantCard {
                                key: "{profile.id}",
                                decision: decisions.read().get(&profile.id).copied().unwrap_or_default(),
                                profile: profile.clone(),
                                on_decide: move |(pid, decision): (i64, ApplicantDecision)| {
                                    decisions.write().insert(pid, decision);
                                },
                                on_chat: move |target: ChatTarget| {
                                    store.dispatch(Action::ChatTargetSelected(target));
                                    on_chat.call(());
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ApplicantCard(
    profile: Profile,
    decision: ApplicantDecision,
    on_decide: EventHandler<(i64, ApplicantDecision)>,
    on_chat: EventHandler<ChatTarget>,
) -> Element {
    let name = profile
        .display_name()
        .unwrap_or_else(|| format!("Volunteer #{}", profile.id));
    let status_class = match decision {
        ApplicantDecision::Pending => "card applicant",
        ApplicantDecision::Accepted => "card applicant accepted",
        ApplicantDecision::Rejected => "card applicant rejected",
    };
    let pid = profile.id;
    let chat_target = ChatTarget::for_profile(&profile);

    rsx! {
        div {
            class: "{status_class}",
            div { class: "avatar", "{profile.initials()}" }
            h3 { "{name}" }
            if let Some(bio) = &profile.bio {
                p { "{bio}" }
            }
            if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
                p { class: "muted", "{phone}" }
            }
            div {
                class: "card-actions",
                button {
                    class: "btn btn-success",
                    disabled: decision == ApplicantDecision::Accepted,
                    onclick: move |_| on_decide.call((pid, ApplicantDecision::Accepted)),
                    Icon { icon: FaCheck, width: 14, height: 14 }
                    " Accept"
                }
                button {
                    class: "btn btn-danger",
                    disabled: decision == ApplicantDecision::Rejected,
                    onclick: move |_| on_decide.call((pid, ApplicantDecision::Rejected)),
                    Icon { icon: FaXmark, width: 14, height: 14 }
                    " Reject"
                }
                if let Some(target) = chat_target {
                    button {
                        class: "btn",
                        onclick: move |_| on_chat.call(target.clone()),
                        Icon { icon: FaComments, width: 14, height: 14 }
                        " Chat"
                    }
                }
            }
        }
    }
}
