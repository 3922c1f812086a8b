//! Authentication flows and hooks for the UI.
//!
//! The flows are plain async functions over [`Backend`] and
//! [`KeyValueStore`] so they run the same against the HTTP client and the
//! in-memory backend. State changes go out through the `dispatch` callback.

use api::{ApiError, Backend, NewUser};
use dioxus::prelude::*;
use store::{Action, KeyValueStore, Role, Session, SessionStore, User};
use tracing::{error, info, warn};

use crate::provider::{use_services, use_store};

/// Reads the persisted session and asks the backend who it belongs to.
///
/// Always ends with exactly one [`Action::SessionResolved`]. A token the
/// backend rejects is removed; a network failure keeps it for the next load.
pub async fn restore_session<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    mut dispatch: impl FnMut(Action),
) where
    B: Backend,
    S: KeyValueStore,
{
    let Some(session) = sessions.load() else {
        dispatch(Action::SessionResolved(None));
        return;
    };
    match backend.current_user(&session.token).await {
        Ok(user) => {
            info!("Restored session for user {}", user.id);
            dispatch(Action::SessionResolved(Some(user)));
        }
        Err(ApiError::Unauthorized(reason)) => {
            warn!("Stored session rejected: {reason}");
            sessions.clear();
            dispatch(Action::SessionResolved(None));
        }
        Err(e) => {
            warn!("Could not restore session: {e}");
            dispatch(Action::SessionResolved(None));
        }
    }
}

/// Exchanges credentials for a session and loads the signed-in user.
pub async fn sign_in<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    ttl_secs: i64,
    email: &str,
    password: &str,
    mut dispatch: impl FnMut(Action),
) -> Result<User, ApiError>
where
    B: Backend,
    S: KeyValueStore,
{
    dispatch(Action::LoginStarted);
    let result = match backend.login(email, password).await {
        Ok(token) => establish(backend, sessions, ttl_secs, &token.access_token).await,
        Err(e) => Err(e),
    };
    finish(result, &mut dispatch)
}

/// Creates an account and signs it in.
pub async fn sign_up<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    ttl_secs: i64,
    new_user: &NewUser,
    role: Role,
    mut dispatch: impl FnMut(Action),
) -> Result<User, ApiError>
where
    B: Backend,
    S: KeyValueStore,
{
    dispatch(Action::LoginStarted);
    let result = match backend.register(new_user, role).await {
        Ok(token) => establish(backend, sessions, ttl_secs, &token.access_token).await,
        Err(e) => Err(e),
    };
    finish(result, &mut dispatch)
}

pub fn sign_out<S: KeyValueStore>(sessions: &SessionStore<S>, mut dispatch: impl FnMut(Action)) {
    sessions.clear();
    dispatch(Action::LoggedOut);
}

async fn establish<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    ttl_secs: i64,
    token: &str,
) -> Result<User, ApiError>
where
    B: Backend,
    S: KeyValueStore,
{
    let user = backend.current_user(token).await?;
    sessions.save(&Session::new(token, ttl_secs).with_user(user.id, user.role()));
    Ok(user)
}

fn finish(
    result: Result<User, ApiError>,
    dispatch: &mut impl FnMut(Action),
) -> Result<User, ApiError> {
    match result {
        Ok(user) => {
            info!("Signed in as user {}", user.id);
            dispatch(Action::LoginSucceeded(user.clone()));
            Ok(user)
        }
        Err(e) => {
            error!("Sign-in failed: {e}");
            dispatch(Action::LoginFailed(e.user_message()));
            Err(e)
        }
    }
}

/// Button that ends the session.
#[component]
pub fn LogoutButton(
    on_logged_out: EventHandler<()>,
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let store = use_store();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                sign_out(&services.sessions(), |action| store.dispatch(action));
                on_logged_out.call(());
            },
            "{label}"
        }
    }
}
