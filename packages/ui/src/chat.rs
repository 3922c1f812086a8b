//! Hosted chat widget, scoped to the lifetime of the chat view.
//!
//! The view waits until the persisted session has been checked, then acquires
//! a widget into its container for the resolved conversation. Each acquisition
//! is a [`WidgetLease`] that releases exactly once, on [`WidgetLease::release`]
//! or on drop, whether or not mounting finished or succeeded. When the
//! conversation changes the current lease is released and a new one taken;
//! when the view unmounts the last lease is released.
//!
//! Participants come from the signed-in user and the chat target selected in
//! the store, falling back to the configured counterpart.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::prelude::*;
use serde::Serialize;
use store::config::ChatConfig;
use store::{chat_user_id, AuthState, ChatTarget, Role, User};
use thiserror::Error;
use tracing::{error, info};

use crate::provider::{use_auth, use_chat_target, use_services};
use crate::views::LoadingView;

const TALKJS_SCRIPT: &str = "https://cdn.talkjs.com/talk.js";

static NEXT_CONTAINER: AtomicUsize = AtomicUsize::new(0);
static NEXT_LEASE: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatParticipant {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Conversation {
    pub app_id: String,
    pub conversation_id: String,
    pub me: ChatParticipant,
    pub other: ChatParticipant,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("chat is not configured")]
    Disabled,
    #[error("sign in to chat")]
    SignedOut,
    #[error("chat widget failed: {0}")]
    Script(String),
    #[error("chat view was closed before the widget mounted")]
    Released,
}

fn role_name(role: Role) -> String {
    role.label().to_lowercase()
}

/// Builds the conversation between the signed-in user and their counterpart.
///
/// Both sides derive the conversation id from the same pair of account ids,
/// so an organization and a volunteer opening a chat with each other land in
/// the same conversation.
pub fn conversation_for(
    config: &ChatConfig,
    user: Option<&User>,
    target: Option<&ChatTarget>,
) -> Result<Conversation, ChatError> {
    if !config.is_enabled() {
        return Err(ChatError::Disabled);
    }
    let user = user.ok_or(ChatError::SignedOut)?;
    let me = ChatParticipant {
        id: chat_user_id(user.id),
        name: user.display_name(),
        email: Some(user.email.clone()),
        role: role_name(user.role()),
    };
    let other = match target {
        Some(target) => ChatParticipant {
            id: target.id.clone(),
            name: target.name.clone(),
            email: None,
            role: role_name(target.role),
        },
        None => ChatParticipant {
            id: config.counterpart_id.clone(),
            name: config.counterpart_name.clone(),
            email: None,
            role: role_name(Role::Organization),
        },
    };
    let mut ids = [me.id.as_str(), other.id.as_str()];
    ids.sort_unstable();
    Ok(Conversation {
        app_id: config.app_id.clone(),
        conversation_id: ids.join("_"),
        me,
        other,
    })
}

/// The conversation the chat view should open, or `None` while the session is
/// still being restored.
pub fn resolved_conversation(
    config: &ChatConfig,
    auth: &AuthState,
    target: Option<&ChatTarget>,
) -> Option<Result<Conversation, ChatError>> {
    auth.resolved
        .then(|| conversation_for(config, auth.user.as_ref(), target))
}

/// Mounts and destroys a chat widget inside a DOM container.
///
/// `key` identifies one acquisition; a container can be reused by later leases.
pub trait WidgetHost {
    fn mount(
        &self,
        key: &str,
        container_id: &str,
        conversation: &Conversation,
    ) -> impl Future<Output = Result<(), ChatError>>;

    /// Must be safe to call while a mount is still in flight.
    fn release(&self, key: &str);
}

/// One acquired widget. Released exactly once.
pub struct WidgetLease<H: WidgetHost> {
    host: H,
    key: String,
    container_id: String,
    released: Cell<bool>,
}

impl<H: WidgetHost> WidgetLease<H> {
    pub fn new(host: H, key: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            host,
            key: key.into(),
            container_id: container_id.into(),
            released: Cell::new(false),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    pub async fn mount(&self, conversation: &Conversation) -> Result<(), ChatError> {
        if self.is_released() {
            return Err(ChatError::Released);
        }
        self.host
            .mount(&self.key, &self.container_id, conversation)
            .await
    }

    pub fn release(&self) {
        if !self.released.replace(true) {
            self.host.release(&self.key);
        }
    }
}

impl<H: WidgetHost> Drop for WidgetLease<H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Holds the view's current lease. Replacing or clearing it releases the
/// previous one.
pub struct LeaseSlot<H: WidgetHost> {
    current: RefCell<Option<Rc<WidgetLease<H>>>>,
}

impl<H: WidgetHost> Default for LeaseSlot<H> {
    fn default() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }
}

impl<H: WidgetHost> LeaseSlot<H> {
    pub fn replace(&self, next: Option<Rc<WidgetLease<H>>>) {
        let previous = self.current.replace(next);
        if let Some(previous) = previous {
            previous.release();
        }
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn current(&self) -> Option<Rc<WidgetLease<H>>> {
        self.current.borrow().clone()
    }
}

/// Drives TalkJS through `document::eval`.
///
/// Mounted sessions live in `window.__vmChat[key]`. Releasing leaves the string
/// `"released"` there, so a mount that finishes afterwards backs out.
#[derive(Clone, Copy, Debug, Default)]
pub struct TalkJsHost;

impl WidgetHost for TalkJsHost {
    async fn mount(
        &self,
        key: &str,
        container_id: &str,
        conversation: &Conversation,
    ) -> Result<(), ChatError> {
        let key_js = serde_json::to_string(key).map_err(|e| ChatError::Script(e.to_string()))?;
        let id_js =
            serde_json::to_string(container_id).map_err(|e| ChatError::Script(e.to_string()))?;
        let conv_js =
            serde_json::to_string(conversation).map_err(|e| ChatError::Script(e.to_string()))?;
        let js = format!(
            r#"(function() {{
                var key = {key_js};
                var id = {id_js};
                var conv = {conv_js};
                window.__vmChat = window.__vmChat || {{}};
                var registry = window.__vmChat;
                var attempts = 0;
                function start() {{
                    if (registry[key] === 'released') {{ dioxus.send('released'); return; }}
                    if (typeof Talk === 'undefined') {{
                        attempts += 1;
                        if (attempts > 100) {{ dioxus.send('TalkJS did not load'); return; }}
                        setTimeout(start, 100);
                        return;
                    }}
                    Talk.ready.then(function() {{
                        if (registry[key] === 'released') {{ dioxus.send('released'); return; }}
                        var container = document.getElementById(id);
                        if (!container) {{ dioxus.send('chat container is gone'); return; }}
                        container.innerHTML = '';
                        var me = new Talk.User(conv.me);
                        var other = new Talk.User(conv.other);
                        var session = new Talk.Session({{ appId: conv.app_id, me: me }});
                        var conversation = session.getOrCreateConversation(conv.conversation_id);
                        conversation.setParticipant(me);
                        conversation.setParticipant(other);
                        var inbox = session.createInbox({{ selected: conversation }});
                        inbox.mount(container);
                        registry[key] = session;
                        dioxus.send('ready');
                    }});
                }}
                start();
            }})();"#
        );
        let mut eval = document::eval(&js);
        match eval.recv::<String>().await {
            Ok(status) if status == "ready" => Ok(()),
            Ok(status) if status == "released" => Err(ChatError::Released),
            Ok(status) => Err(ChatError::Script(status)),
            Err(e) => Err(ChatError::Script(format!("{e:?}"))),
        }
    }

    fn release(&self, key: &str) {
        let Ok(key_js) = serde_json::to_string(key) else {
            return;
        };
        let js = format!(
            r#"(function() {{
                var key = {key_js};
                window.__vmChat = window.__vmChat || {{}};
                var session = window.__vmChat[key];
                if (session && typeof session.destroy === 'function') {{ session.destroy(); }}
                window.__vmChat[key] = 'released';
            }})();"#
        );
        document::eval(&js);
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ChatStatus {
    Connecting,
    Ready,
    Failed(ChatError),
}

/// Chat page body. Each instance owns its own container and widget.
#[component]
pub fn ChatView(#[props(default = "Messages".to_string())] title: String) -> Element {
    let services = use_services();
    let auth = use_auth();
    let target = use_chat_target();
    let container_id =
        use_hook(|| format!("chat-container-{}", NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed)));
    let slot = use_hook(|| Rc::new(LeaseSlot::<TalkJsHost>::default()));
    let mut status = use_signal(|| ChatStatus::Connecting);

    let conversation = use_memo({
        let config = services.config.chat.clone();
        move || resolved_conversation(&config, &auth.read(), target.read().as_ref())
    });

    use_effect({
        let slot = slot.clone();
        let container_id = container_id.clone();
        move || {
            let current = conversation();
            slot.clear();
            let opened = match current {
                None => {
                    status.set(ChatStatus::Connecting);
                    return;
                }
                Some(Err(e)) => {
                    error!("Chat unavailable: {e}");
                    status.set(ChatStatus::Failed(e));
                    return;
                }
                Some(Ok(opened)) => opened,
            };
            status.set(ChatStatus::Connecting);
            let key = format!("{container_id}/{}", NEXT_LEASE.fetch_add(1, Ordering::Relaxed));
            let lease = Rc::new(WidgetLease::new(TalkJsHost, key, container_id.clone()));
            slot.replace(Some(lease.clone()));
            spawn(async move {
                let result = lease.mount(&opened).await;
                if lease.is_released() {
                    return;
                }
                match result {
                    Ok(()) => {
                        info!("Chat mounted in {}", lease.container_id());
                        status.set(ChatStatus::Ready);
                    }
                    Err(ChatError::Released) => {}
                    Err(e) => {
                        error!("Chat unavailable: {e}");
                        status.set(ChatStatus::Failed(e));
                    }
                }
            });
        }
    });

    {
        let slot = slot.clone();
        use_drop(move || slot.clear());
    }

    let heading = match conversation() {
        Some(Ok(conversation)) => Some(conversation.other.name),
        _ => None,
    };

    rsx! {
        document::Script { src: TALKJS_SCRIPT }
        div {
            class: "page chat-page",
            h1 { "{title}" }
            if let Some(name) = heading {
                p { class: "muted", "Conversation with {name}" }
            }
            match status() {
                ChatStatus::Connecting => rsx! { LoadingView {} },
                ChatStatus::Ready => rsx! {},
                ChatStatus::Failed(e) => rsx! { div { class: "form-alert", "{e}" } },
            }
            div {
                id: "{container_id}",
                class: "chat-container",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Profile;

    #[derive(Clone, Default)]
    struct FakeHost {
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl WidgetHost for FakeHost {
        async fn mount(
            &self,
            key: &str,
            _container_id: &str,
            _conversation: &Conversation,
        ) -> Result<(), ChatError> {
            self.log.borrow_mut().push(format!("mount {key}"));
            if self.fail {
                Err(ChatError::Script("boom".to_string()))
            } else {
                Ok(())
            }
        }

        fn release(&self, key: &str) {
            self.log.borrow_mut().push(format!("release {key}"));
        }
    }

    fn config() -> ChatConfig {
        ChatConfig {
            app_id: "tTest".to_string(),
            ..ChatConfig::default()
        }
    }

    fn org_user() -> User {
        User {
            id: 5,
            email: "org@example.org".to_string(),
            username: None,
            is_org: true,
            profile: Some(Profile {
                id: 6,
                user_id: Some(5),
                org_name: Some("Harbour Cleanup".to_string()),
                ..Profile::default()
            }),
        }
    }

    fn volunteer_profile() -> Profile {
        Profile {
            id: 9,
            user_id: Some(12),
            first: Some("Ada".to_string()),
            last: Some("Lovelace".to_string()),
            ..Profile::default()
        }
    }

    fn volunteer_user() -> User {
        User {
            id: 12,
            email: "ada@example.org".to_string(),
            username: None,
            is_org: false,
            profile: Some(volunteer_profile()),
        }
    }

    fn conversation() -> Conversation {
        conversation_for(&config(), Some(&org_user()), None).unwrap()
    }

    #[tokio::test]
    async fn test_lease_releases_once_on_drop() {
        let host = FakeHost::default();
        let log = host.log.clone();
        {
            let lease = WidgetLease::new(host, "c/0", "chat-container-0");
            lease.mount(&conversation()).await.unwrap();
            lease.release();
        }
        assert_eq!(*log.borrow(), vec!["mount c/0", "release c/0"]);
    }

    #[tokio::test]
    async fn test_failed_mount_still_releases() {
        let host = FakeHost {
            fail: true,
            ..FakeHost::default()
        };
        let log = host.log.clone();
        let lease = WidgetLease::new(host, "c/0", "c");
        assert!(lease.mount(&conversation()).await.is_err());
        drop(lease);
        assert_eq!(*log.borrow(), vec!["mount c/0", "release c/0"]);
    }

    #[tokio::test]
    async fn test_mount_after_release_is_refused() {
        let host = FakeHost::default();
        let log = host.log.clone();
        let lease = WidgetLease::new(host, "c/0", "c");
        lease.release();
        assert_eq!(lease.mount(&conversation()).await, Err(ChatError::Released));
        drop(lease);
        assert_eq!(*log.borrow(), vec!["release c/0"]);
    }

    #[test]
    fn test_slot_releases_previous_lease_on_replace() {
        let host = FakeHost::default();
        let log = host.log.clone();
        let slot = LeaseSlot::default();
        let first = Rc::new(WidgetLease::new(host.clone(), "c/0", "c"));
        slot.replace(Some(first.clone()));
        slot.replace(Some(Rc::new(WidgetLease::new(host, "c/1", "c"))));
        assert!(first.is_released());
        assert_eq!(slot.current().map(|l| l.key().to_string()), Some("c/1".to_string()));

        slot.clear();
        drop(first);
        assert_eq!(*log.borrow(), vec!["release c/0", "release c/1"]);
    }

    #[test]
    fn test_conversation_participants() {
        let conversation = conversation();
        assert_eq!(conversation.me.id, "user-5");
        assert_eq!(conversation.me.name, "Harbour Cleanup");
        assert_eq!(conversation.me.role, "organization");
        assert_eq!(conversation.other.id, ChatConfig::default().counterpart_id);

        let target = ChatTarget::for_profile(&volunteer_profile()).unwrap();
        let conversation = conversation_for(&config(), Some(&org_user()), Some(&target)).unwrap();
        assert_eq!(conversation.other.name, "Ada Lovelace");
        assert_eq!(conversation.other.role, "volunteer");
        assert_eq!(conversation.conversation_id, "user-12_user-5");
    }

    #[test]
    fn test_both_sides_open_the_same_conversation() {
        let applicant = ChatTarget::for_profile(&volunteer_profile()).unwrap();
        let from_org = conversation_for(&config(), Some(&org_user()), Some(&applicant)).unwrap();

        let post = store::Opportunity {
            id: 3,
            title: "Beach cleanup".to_string(),
            owner: Some(5),
            ..store::Opportunity::default()
        };
        let owner = ChatTarget::for_owner(&post).unwrap();
        let from_volunteer =
            conversation_for(&config(), Some(&volunteer_user()), Some(&owner)).unwrap();

        assert_eq!(from_org.conversation_id, from_volunteer.conversation_id);
        assert_eq!(from_org.me.id, from_volunteer.other.id);
        assert_eq!(from_volunteer.me.id, from_org.other.id);
    }

    #[test]
    fn test_conversation_waits_for_session() {
        let pending = AuthState::default();
        assert_eq!(resolved_conversation(&config(), &pending, None), None);

        let anonymous = AuthState {
            resolved: true,
            ..AuthState::default()
        };
        assert_eq!(
            resolved_conversation(&config(), &anonymous, None),
            Some(Err(ChatError::SignedOut))
        );

        let signed_in = AuthState {
            user: Some(org_user()),
            resolved: true,
            ..AuthState::default()
        };
        assert_eq!(
            resolved_conversation(&config(), &signed_in, None),
            Some(Ok(conversation()))
        );
    }

    #[test]
    fn test_conversation_requires_app_id_and_user() {
        assert_eq!(
            conversation_for(&ChatConfig::default(), Some(&org_user()), None),
            Err(ChatError::Disabled)
        );
        assert_eq!(conversation_for(&config(), None, None), Err(ChatError::SignedOut));
    }
}
