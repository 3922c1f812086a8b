//! Profile edit form, volunteer and organization variants.
//!
//! Submitting validates every field first. Only an all-valid draft is sent,
//! as exactly one update request carrying the whole draft.

use api::{ApiError, Backend};
use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use store::{Action, FormDraft, FormState, ProfileUpdate, Role, User};
use thiserror::Error;
use tracing::{error, info};

use crate::form_field::FormField;
use crate::provider::{use_auth, use_services, use_store};

const VOLUNTEER_FIELDS: &[&str] = &["first", "last", "phone", "bio"];
const ORGANIZATION_FIELDS: &[&str] = &["org_name", "first", "last", "phone", "bio"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    Volunteer,
    Organization,
}

impl ProfileKind {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Volunteer => ProfileKind::Volunteer,
            Role::Organization => ProfileKind::Organization,
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            ProfileKind::Volunteer => VOLUNTEER_FIELDS,
            ProfileKind::Organization => ORGANIZATION_FIELDS,
        }
    }

    /// A draft with this variant's fields, prefilled from the user's profile.
    pub fn draft_for(self, user: Option<&User>) -> FormDraft {
        let mut draft = FormDraft::with_fields(self.fields());
        let Some(profile) = user.and_then(|u| u.profile.as_ref()) else {
            return draft;
        };
        let known = [
            ("first", &profile.first),
            ("last", &profile.last),
            ("phone", &profile.phone),
            ("bio", &profile.bio),
            ("org_name", &profile.org_name),
        ];
        for (field, value) in known {
            if let (true, Some(value)) = (draft.get(field).is_some(), value) {
                draft.set(field, value.as_str());
            }
        }
        draft
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("invalid fields: {}", .0.join(", "))]
    Invalid(Vec<String>),
    #[error("not signed in")]
    NotSignedIn,
    #[error("rejected by the server: {0}")]
    Rejected(#[from] ApiError),
}

/// Validates the whole draft and builds the update body.
pub fn prepare_submit(form: &mut FormState) -> Result<ProfileUpdate, SubmitError> {
    let invalid = form.validate();
    if !invalid.is_empty() {
        return Err(SubmitError::Invalid(invalid));
    }
    Ok(ProfileUpdate::from_draft(&form.draft))
}

/// Sends one update and merges the stored profile into the signed-in user.
pub async fn send_profile_update<B: Backend>(
    backend: &B,
    token: Option<&str>,
    current: Option<User>,
    update: &ProfileUpdate,
    mut dispatch: impl FnMut(Action),
) -> Result<User, SubmitError> {
    let (Some(token), Some(mut user)) = (token, current) else {
        return Err(SubmitError::NotSignedIn);
    };
    dispatch(Action::ProfileUpdateStarted);
    match backend.update_profile(token, update).await {
        Ok(profile) => {
            info!("Updated profile {}", profile.id);
            user.profile = Some(profile);
            dispatch(Action::ProfileUpdated(user.clone()));
            Ok(user)
        }
        Err(e) => {
            error!("Profile update failed: {e}");
            dispatch(Action::ProfileUpdateFailed(e.user_message()));
            Err(SubmitError::Rejected(e))
        }
    }
}

pub async fn submit_profile<B: Backend>(
    backend: &B,
    token: Option<&str>,
    current: Option<User>,
    form: &mut FormState,
    dispatch: impl FnMut(Action),
) -> Result<User, SubmitError> {
    let update = prepare_submit(form)?;
    send_profile_update(backend, token, current, &update, dispatch).await
}

fn field_text(field: &str) -> (&'static str, &'static str) {
    match field {
        "first" => ("First name", "Letters only, up to 50 characters."),
        "last" => ("Last name", "Letters only, up to 50 characters."),
        "phone" => ("Phone", "Use 7 to 15 digits."),
        "bio" => ("About", "At most 500 characters."),
        "org_name" => ("Organization name", "Enter your organization's name."),
        _ => ("", "This field is invalid."),
    }
}

/// Edit form for the signed-in account. Calls `on_saved` after the backend
/// accepted the update.
#[component]
pub fn ProfileEditForm(kind: ProfileKind, on_saved: EventHandler<()>) -> Element {
    let services = use_services();
    let store = use_store();
    let auth = use_auth();
    let toasts = use_toast();
    let mut form = use_signal(|| FormState::new(kind.draft_for(auth.peek().user.as_ref())));
    let mut rejection = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        rejection.set(None);
        let prepared = prepare_submit(&mut form.write());
        let update = match prepared {
            Ok(update) => update,
            Err(e) => {
                tracing::debug!("Not submitting: {e}");
                return;
            }
        };
        let services = services.clone();
        spawn(async move {
            form.write().submitting = true;
            let token = services.token();
            let current = auth.peek().user.clone();
            let result = send_profile_update(
                &services.backend,
                token.as_deref(),
                current,
                &update,
                |action| store.dispatch(action),
            )
            .await;
            form.write().submitting = false;
            match result {
                Ok(_) => {
                    toasts.success("Profile saved".to_string(), ToastOptions::new());
                    on_saved.call(());
                }
                Err(e) => {
                    let message = match &e {
                        SubmitError::Rejected(api) => api.user_message(),
                        other => other.to_string(),
                    };
                    toasts.error(
                        "Could not save profile".to_string(),
                        ToastOptions::new().description(message.clone()),
                    );
                    rejection.set(Some(message));
                }
            }
        });
    };

    let heading = match kind {
        ProfileKind::Volunteer => "Edit your profile",
        ProfileKind::Organization => "Edit your organization",
    };
    let state = form.read().clone();

    rsx! {
        div {
            class: "page-narrow",
            h1 { "{heading}" }

            form {
                class: "stacked-form",
                onsubmit: handle_submit,

                if let Some(message) = rejection() {
                    div { class: "form-alert", "{message}" }
                }

                for (field, value) in state.draft.iter().map(|(f, v)| (f.to_string(), v.to_string())) {
                    FormField {
                        key: "{field}",
                        name: field.clone(),
                        label: field_text(&field).0.to_string(),
                        hint: field_text(&field).1.to_string(),
                        value,
                        invalid: state.is_invalid(&field),
                        multiline: field == "bio",
                        input_type: if field == "phone" { "tel".to_string() } else { "text".to_string() },
                        oninput: {
                            let field = field.clone();
                            move |value: String| form.write().on_input_change(&field, value)
                        },
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: state.submitting,
                    if state.submitting { "Saving..." } else { "Save profile" }
                }
            }
        }
    }
}
