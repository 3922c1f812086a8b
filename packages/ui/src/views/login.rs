//! Login page view with email/password form.

use dioxus::prelude::*;
use store::{Action, FormDraft, FormState, User};

use crate::auth::sign_in;
use crate::form_field::FormField;
use crate::provider::{use_auth, use_services, use_store};

/// Login page component.
#[component]
pub fn LoginView(on_logged_in: EventHandler<User>, on_register: EventHandler<()>) -> Element {
    let services = use_services();
    let store = use_store();
    let auth = use_auth();
    let mut form = use_signal(|| FormState::new(FormDraft::with_fields(&["email", "password"])));

    use_effect(move || store.dispatch(Action::AuthErrorCleared));

    // Already signed in: nothing to do here.
    use_effect(move || {
        if let Some(user) = auth.read().user.clone() {
            on_logged_in.call(user);
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if !form.write().validate().is_empty() {
            return;
        }
        let services = services.clone();
        spawn(async move {
            let (email, password) = {
                let state = form.read();
                (
                    state.draft.value("email").trim().to_string(),
                    state.draft.value("password").to_string(),
                )
            };
            form.write().submitting = true;
            let result = sign_in(
                &services.backend,
                &services.sessions(),
                services.config.session.ttl_secs,
                &email,
                &password,
                |action| store.dispatch(action),
            )
            .await;
            form.write().submitting = false;
            if let Err(e) = result {
                tracing::warn!("Login rejected: {e}");
            }
        });
    };

    let state = form.read().clone();
    let error = auth.read().error.clone();

    rsx! {
        div {
            class: "page-narrow",
            h1 { "Sign in" }

            form {
                class: "stacked-form",
                onsubmit: handle_login,

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
                    if state.submitting { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "muted",
                "No account yet? "
                button {
                    class: "btn btn-link",
                    onclick: move |_| on_register.call(()),
                    "Create one"
                }
            }
        }
    }
}
