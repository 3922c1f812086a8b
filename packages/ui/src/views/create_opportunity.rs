use api::Backend;
use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use store::{FormDraft, FormState, NewOpportunity, Opportunity};
use tracing::{error, info};

use crate::form_field::FormField;
use crate::profile_edit::SubmitError;
use crate::provider::use_services;

const FIELDS: &[&str] = &["title", "description", "location"];

/// Validates the whole draft and builds the request body.
pub fn prepare_opportunity(form: &mut FormState) -> Result<NewOpportunity, SubmitError> {
    let invalid = form.validate();
    if !invalid.is_empty() {
        return Err(SubmitError::Invalid(invalid));
    }
    Ok(NewOpportunity::from_draft(&form.draft))
}

/// Creates the opportunity under the signed-in organization.
pub async fn send_opportunity<B: Backend>(
    backend: &B,
    token: Option<&str>,
    post: &NewOpportunity,
) -> Result<Opportunity, SubmitError> {
    let token = token.ok_or(SubmitError::NotSignedIn)?;
    match backend.create_post(token, post).await {
        Ok(created) => {
            info!("Created opportunity {}", created.id);
            Ok(created)
        }
        Err(e) => {
            error!("Failed to create opportunity: {e}");
            Err(SubmitError::Rejected(e))
        }
    }
}

pub async fn publish_opportunity<B: Backend>(
    backend: &B,
    token: Option<&str>,
    form: &mut FormState,
) -> Result<Opportunity, SubmitError> {
    let post = prepare_opportunity(form)?;
    send_opportunity(backend, token, &post).await
}

#[component]
pub fn CreateOpportunityForm(on_created: EventHandler<Opportunity>) -> Element {
    let services = use_services();
    let toasts = use_toast();
    let mut form = use_signal(|| FormState::new(FormDraft::with_fields(FIELDS)));

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let prepared = prepare_opportunity(&mut form.write());
        let post = match prepared {
            Ok(post) => post,
            Err(e) => {
                tracing::debug!("Not publishing: {e}");
                return;
            }
        };
        let services = services.clone();
        spawn(async move {
            form.write().submitting = true;
            let token = services.token();
            let result = send_opportunity(&services.backend, token.as_deref(), &post).await;
            form.write().submitting = false;
            match result {
                Ok(created) => {
                    toasts.success("Opportunity published".to_string(), ToastOptions::new());
                    on_created.call(created);
                }
                Err(e) => {
                    let message = match &e {
                        SubmitError::Rejected(api) => api.user_message(),
                        other => other.to_string(),
                    };
                    toasts.error(
                        "Could not publish".to_string(),
                        ToastOptions::new().description(message),
                    );
                }
            }
        });
    };

    let state = form.read().clone();

    rsx! {
        div {
            class: "page-narrow",
            h1 { "New opportunity" }
            form {
                class: "stacked-form",
                onsubmit: handle_submit,
                FormField {
                    name: "title",
                    label: "Title",
                    hint: "3 to 120 characters.",
                    value: state.draft.value("title").to_string(),
                    invalid: state.is_invalid("title"),
                    oninput: move |value: String| form.write().on_input_change("title", value),
                }
                FormField {
                    name: "description",
                    label: "Description",
                    hint: "Describe the work, up to 2000 characters.",
                    multiline: true,
                    value: state.draft.value("description").to_string(),
                    invalid: state.is_invalid("description"),
                    oninput: move |value: String| form.write().on_input_change("description", value),
                }
                FormField {
                    name: "location",
                    label: "Location",
                    hint: "At most 120 characters.",
                    value: state.draft.value("location").to_string(),
                    invalid: state.is_invalid("location"),
                    oninput: move |value: String| form.write().on_input_change("location", value),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: state.submitting,
                    if state.submitting { "Publishing..." } else { "Publish" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::memory::Request;
    use api::MemoryBackend;
    use store::Role;

    fn draft(title: &str) -> FormState {
        let mut form = FormState::new(FormDraft::with_fields(FIELDS));
        form.on_input_change("title", title);
        form.on_input_change("description", "Bring gloves and water.");
        form
    }

    #[tokio::test]
    async fn test_publish_sends_trimmed_post() {
        let backend = MemoryBackend::new();
        let org = backend.add_account("org@example.org", "password1", Role::Organization);
        let token = backend.issue_token(&org);
        let mut form = draft("  Beach cleanup ");

        let created = publish_opportunity(&backend, Some(&token), &mut form).await.unwrap();

        assert_eq!(created.title, "Beach cleanup");
        assert_eq!(created.owner, Some(org.id));
        assert_eq!(
            backend.requests(),
            vec![Request::CreatePost(NewOpportunity {
                title: "Beach cleanup".to_string(),
                description: "Bring gloves and water.".to_string(),
                location: String::new(),
            })]
        );
    }

    #[tokio::test]
    async fn test_short_title_is_not_sent() {
        let backend = MemoryBackend::new();
        let mut form = draft("ab");
        let result = publish_opportunity(&backend, Some("token"), &mut form).await;
        assert_eq!(result, Err(SubmitError::Invalid(vec!["title".to_string()])));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_volunteer_is_rejected_by_backend() {
        let backend = MemoryBackend::new();
        let volunteer = backend.add_account("vol@example.org", "password1", Role::Volunteer);
        let token = backend.issue_token(&volunteer);
        let mut form = draft("Beach cleanup");
        let result = publish_opportunity(&backend, Some(&token), &mut form).await;
        assert!(matches!(result, Err(SubmitError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_edits_after_validation_survive_the_request() {
        let backend = MemoryBackend::new();
        let org = backend.add_account("org@example.org", "password1", Role::Organization);
        let token = backend.issue_token(&org);
        let mut form = draft("Beach cleanup");

        let post = prepare_opportunity(&mut form).unwrap();
        form.on_input_change("location", "Pier 4");
        let created = send_opportunity(&backend, Some(&token), &post).await.unwrap();

        assert_eq!(created.title, "Beach cleanup");
        assert_eq!(form.draft.value("location"), "Pier 4");
        assert!(!form.is_invalid("title"));
    }
}
