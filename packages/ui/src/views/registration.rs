//! Registration page view, one per account role.

use api::NewUser;
use dioxus::prelude::*;
use store::{Action, FormDraft, FormState, Role, User};

use crate::auth::sign_up;
use crate::form_field::FormField;
use crate::provider::{use_auth, use_services, use_store};

const FIELDS: &[&str] = &["email", "username", "password"];

fn new_user(form: &FormState) -> NewUser {
    NewUser {
        email: form.draft.value("email").trim().to_string(),
        username: form.draft.value("username").trim().to_string(),
        password: form.draft.value("password").to_string(),
    }
}

#[component]
pub fn RegistrationView(
    role: Role,
    on_registered: EventHandler<User>,
    on_login: EventHandler<()>,
) -> Element {
    let services = use_services();
    let store = use_store();
    let auth = use_auth();
    let mut form = use_signal(|| FormState::new(FormDraft::with_fields(FIELDS)));

    use_effect(move || store.dispatch(Action::AuthErrorCleared));

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        if !form.write().validate().is_empty() {
            return;
        }
        let services = services.clone();
        spawn(async move {
            let new_user = new_user(&form.read());
            form.write().submitting = true;
            let result = sign_up(
                &services.backend,
                &services.sessions(),
                services.config.session.ttl_secs,
                &new_user,
                role,
                |action| store.dispatch(action),
            )
            .await;
            form.write().submitting = false;
            match result {
                Ok(user) => on_registered.call(user),
                Err(e) => tracing::warn!("Registration rejected: {e}"),
            }
        });
    };

    let heading = match role {
        Role::Volunteer => "Sign up to volunteer",
        Role::Organization => "Register your organization",
    };
    let state = form.read().clone();
    let error = auth.read().error.clone();

    rsx! {
        div {
            class: "page-narrow",
            h1 { "{heading}" }

            form {
                class: "stacked-form",
                onsubmit: handle_register,

                if let Some(err) = error {
                    div { class: "form-alert", "{err}" }
                }

                FormField {
                    name: "email",
                    label: "Email",
                    input_type: "email",
                    hint: "Enter a valid email address.",
                    value: state.draft.value("email").to_string(),
                    invalid: state.is_invalid("email"),
                    oninput: move |value: String| form.write().on_input_change("email", value),
                }
                FormField {
                    name: "username",
                    label: "Username",
                    hint: "3 to 20 letters, digits, '_' or '-'.",
                    value: state.draft.value("username").to_string(),
                    invalid: state.is_invalid("username"),
                    oninput: move |value: String| form.write().on_input_change("username", value),
                }
                FormField {
                    name: "password",
                    label: "Password",
                    input_type: "password",
                    hint: "At least 7 characters.",
                    value: state.draft.value("password").to_string(),
                    invalid: state.is_invalid("password"),
                    oninput: move |value: String| form.write().on_input_change("password", value),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: state.submitting,
                    if state.submitting { "Creating account..." } else { "Create account" }
                }
            }

            p {
                class: "muted",
                "Already registered? "
                button {
                    class: "btn btn-link",
                    onclick: move |_| on_login.call(()),
                    "Sign in"
                }
            }
        }
    }
}
