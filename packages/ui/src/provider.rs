//! Store and service contexts for the UI.
//!
//! [`AppProvider`] owns the single [`AppState`] signal and the services every
//! view talks to. Views read memoised projections ([`use_auth`],
//! [`use_current_post`], [`use_chat_target`]) and change state only through
//! [`AppStore::dispatch`].

use api::HttpBackend;
use dioxus::prelude::*;
use dioxus_primitives::toast::ToastProvider;
use store::{reduce, Action, AppConfig, AppState, AuthState, ChatTarget, PostSlot, SessionStore};

use crate::auth::restore_session;
use crate::storage::{make_storage, PlatformStorage};

/// Backend client, persistent storage and configuration shared by all views.
#[derive(Clone, Debug)]
pub struct Services {
    pub backend: HttpBackend,
    pub storage: PlatformStorage,
    pub config: AppConfig,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        Self {
            backend: HttpBackend::new(config.api.base_url.clone()),
            storage: make_storage(),
            config,
        }
    }

    pub fn sessions(&self) -> SessionStore<PlatformStorage> {
        SessionStore::new(self.storage.clone(), &self.config.session.storage_prefix)
    }

    /// Bearer token of the persisted session, if it is still valid.
    pub fn token(&self) -> Option<String> {
        self.sessions().load().map(|session| session.token)
    }
}

/// Handle to the application state.
#[derive(Clone, Copy, PartialEq)]
pub struct AppStore {
    state: Signal<AppState>,
}

impl AppStore {
    pub fn dispatch(&self, action: Action) {
        tracing::debug!("dispatch {action:?}");
        let mut state = self.state;
        state.with_mut(|state| reduce(state, action));
    }

    pub fn state(&self) -> Signal<AppState> {
        self.state
    }
}

/// Provides a fresh store seeded with `initial` to this component's subtree.
pub(crate) fn use_store_provider(initial: AppState) -> AppStore {
    let state = use_signal(move || initial);
    use_context_provider(|| AppStore { state })
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

pub fn use_store() -> AppStore {
    use_context::<AppStore>()
}

/// Who is signed in. Re-renders only when the auth slice changes.
pub fn use_auth() -> Memo<AuthState> {
    let store = use_store();
    use_memo(move || store.state.read().auth.clone())
}

pub fn use_current_post() -> Memo<PostSlot> {
    let store = use_store();
    use_memo(move || store.state.read().current_post.clone())
}

pub fn use_chat_target() -> Memo<Option<ChatTarget>> {
    let store = use_store();
    use_memo(move || store.state.read().chat_target.clone())
}

/// Provides the store and services, and restores the persisted session once.
/// Wrap the router with this component.
#[component]
pub fn AppProvider(config: AppConfig, children: Element) -> Element {
    let services = use_context_provider(|| Services::new(config.clone()));
    let store = use_store_provider(AppState::default());

    let _ = use_resource(move || {
        let services = services.clone();
        async move {
            restore_session(&services.backend, &services.sessions(), |action| {
                store.dispatch(action)
            })
            .await;
        }
    });

    rsx! {
        ToastProvider {
            {children}
        }
    }
}
