//! # Application state and its reducer
//!
//! [`AppState`] is the single owned source of truth for everything shared
//! between views: who is signed in, the opportunity currently on screen, the
//! profiles fetched for it, and the person the chat view should open a
//! conversation with.
//!
//! State only changes through [`reduce`], one named [`Action`] at a time. Views
//! never hold references into the state; they read cloned projections and
//! dispatch actions.
//!
//! ## Stale results
//!
//! Fetch results carry the id they were requested for. [`reduce`] only applies
//! `PostLoaded`, `PostMissing` and `PostFailed` while the current-post slot is
//! waiting for that same id, so a response that arrives after the view cleared
//! the slot (or moved on to another opportunity) is dropped.

use std::collections::BTreeMap;

use crate::models::{Opportunity, Profile, Role, User};

/// Who is signed in, and whether that is known yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// `false` until the persisted session has been read and checked.
    pub resolved: bool,
    /// A login, registration or profile update is in flight.
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }
}

/// The "current post" slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PostSlot {
    #[default]
    Empty,
    Loading {
        id: i64,
    },
    Loaded(Opportunity),
    /// The backend has no post with this id.
    Missing {
        id: i64,
    },
    /// The request failed for another reason.
    Failed {
        id: i64,
        error: String,
    },
}

impl PostSlot {
    fn awaits(&self, expected: i64) -> bool {
        matches!(self, PostSlot::Loading { id } if *id == expected)
    }

    pub fn post(&self) -> Option<&Opportunity> {
        match self {
            PostSlot::Loaded(post) => Some(post),
            _ => None,
        }
    }
}

/// Conversation partner picked for the chat view.
///
/// Ids are account based, the same shape the chat view uses for the signed-in
/// user, so both sides of a conversation agree on who is talking.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTarget {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Chat identity of an account.
pub fn chat_user_id(user_id: i64) -> String {
    format!("user-{user_id}")
}

impl ChatTarget {
    /// The applicant behind a profile. `None` when the profile has no account id.
    pub fn for_profile(profile: &Profile) -> Option<Self> {
        let user_id = profile.user_id?;
        Some(Self {
            id: chat_user_id(user_id),
            name: profile
                .display_name()
                .unwrap_or_else(|| format!("Volunteer #{}", profile.id)),
            role: Role::Volunteer,
        })
    }

    /// The organization that owns a post. `None` for posts without an owner.
    pub fn for_owner(post: &Opportunity) -> Option<Self> {
        let owner = post.owner?;
        Some(Self {
            id: chat_user_id(owner),
            name: format!("Organizer of {}", post.title),
            role: Role::Organization,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub current_post: PostSlot,
    pub profiles: BTreeMap<i64, Profile>,
    pub chat_target: Option<ChatTarget>,
}

/// Every way the state can change.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// The persisted session was read; `None` when there is none or it was rejected.
    SessionResolved(Option<User>),
    LoginStarted,
    LoginSucceeded(User),
    LoginFailed(String),
    /// A login or registration page opened; errors from earlier attempts no longer apply.
    AuthErrorCleared,
    LoggedOut,
    ProfileUpdateStarted,
    ProfileUpdated(User),
    ProfileUpdateFailed(String),
    PostRequested(i64),
    PostLoaded(Opportunity),
    PostMissing(i64),
    PostFailed { id: i64, error: String },
    PostDeleted(i64),
    CurrentPostCleared,
    ProfileLoaded(Profile),
    ChatTargetSelected(ChatTarget),
    ChatTargetCleared,
}

impl AppState {
    pub fn apply(&mut self, action: Action) {
        reduce(self, action);
    }
}

/// Applies one action to the state.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::SessionResolved(user) => {
            state.auth = AuthState {
                user,
                resolved: true,
                is_loading: false,
                error: None,
            };
        }
        Action::LoginStarted | Action::ProfileUpdateStarted => {
            state.auth.is_loading = true;
            state.auth.error = None;
        }
        Action::LoginSucceeded(user) | Action::ProfileUpdated(user) => {
            if let Some(profile) = &user.profile {
                state.profiles.insert(profile.id, profile.clone());
            }
            state.auth = AuthState {
                user: Some(user),
                resolved: true,
                is_loading: false,
                error: None,
            };
        }
        Action::LoginFailed(error) => {
            state.auth = AuthState {
                user: None,
                resolved: true,
                is_loading: false,
                error: Some(error),
            };
        }
        Action::AuthErrorCleared => {
            state.auth.error = None;
        }
        Action::ProfileUpdateFailed(error) => {
            state.auth.is_loading = false;
            state.auth.error = Some(error);
        }
        Action::LoggedOut => {
            *state = AppState {
                auth: AuthState {
                    resolved: true,
                    ..AuthState::default()
                },
                ..AppState::default()
            };
        }
        Action::PostRequested(id) => {
            state.current_post = PostSlot::Loading { id };
        }
        Action::PostLoaded(post) => {
            if state.current_post.awaits(post.id) {
                state.current_post = PostSlot::Loaded(post);
            }
        }
        Action::PostMissing(id) => {
            if state.current_post.awaits(id) {
                state.current_post = PostSlot::Missing { id };
            }
        }
        Action::PostFailed { id, error } => {
            if state.current_post.awaits(id) {
                state.current_post = PostSlot::Failed { id, error };
            }
        }
        Action::PostDeleted(id) => {
            let current = match &state.current_post {
                PostSlot::Loaded(post) => Some(post.id),
                PostSlot::Loading { id } | PostSlot::Missing { id } | PostSlot::Failed { id, .. } => {
                    Some(*id)
                }
                PostSlot::Empty => None,
            };
            if current == Some(id) {
                state.current_post = PostSlot::Empty;
            }
        }
        Action::CurrentPostCleared => {
            state.current_post = PostSlot::Empty;
        }
        Action::ProfileLoaded(profile) => {
            state.profiles.insert(profile.id, profile);
        }
        Action::ChatTargetSelected(target) => {
            state.chat_target = Some(target);
        }
        Action::ChatTargetCleared => {
            state.chat_target = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, is_org: bool) -> User {
        User {
            id,
            email: format!("user{id}@example.org"),
            username: None,
            is_org,
            profile: Some(Profile {
                id: id * 10,
                first: Some("Ada".to_string()),
                ..Profile::default()
            }),
        }
    }

    fn post(id: i64) -> Opportunity {
        Opportunity {
            id,
            title: "Beach cleanup".to_string(),
            ..Opportunity::default()
        }
    }

    #[test]
    fn test_initial_auth_is_unresolved() {
        let state = AppState::default();
        assert!(!state.auth.resolved);
        assert!(!state.auth.is_authenticated());
    }

    #[test]
    fn test_session_resolution() {
        let mut state = AppState::default();
        state.apply(Action::SessionResolved(Some(user(1, true))));
        assert!(state.auth.resolved);
        assert_eq!(state.auth.role(), Some(Role::Organization));

        state.apply(Action::LoggedOut);
        assert!(state.auth.resolved);
        assert!(!state.auth.is_authenticated());
    }

    #[test]
    fn test_login_flow() {
        let mut state = AppState::default();
        state.apply(Action::SessionResolved(None));
        state.apply(Action::LoginStarted);
        assert!(state.auth.is_loading);

        state.apply(Action::LoginFailed("bad credentials".to_string()));
        assert!(!state.auth.is_loading);
        assert_eq!(state.auth.error.as_deref(), Some("bad credentials"));

        state.apply(Action::LoginStarted);
        assert_eq!(state.auth.error, None);
        state.apply(Action::LoginSucceeded(user(2, false)));
        assert_eq!(state.auth.role(), Some(Role::Volunteer));
        assert!(state.profiles.contains_key(&20));
    }

    #[test]
    fn test_profile_update_failure_keeps_user() {
        let mut state = AppState::default();
        state.apply(Action::LoginSucceeded(user(2, false)));
        state.apply(Action::ProfileUpdateStarted);
        state.apply(Action::ProfileUpdateFailed("422".to_string()));
        assert!(state.auth.is_authenticated());
        assert!(!state.auth.is_loading);
        assert_eq!(state.auth.error.as_deref(), Some("422"));
    }

    #[test]
    fn test_post_lifecycle() {
        let mut state = AppState::default();
        state.apply(Action::PostRequested(5));
        assert_eq!(state.current_post, PostSlot::Loading { id: 5 });

        state.apply(Action::PostLoaded(post(5)));
        assert_eq!(state.current_post.post().map(|p| p.id), Some(5));

        state.apply(Action::CurrentPostCleared);
        assert_eq!(state.current_post, PostSlot::Empty);
    }

    #[test]
    fn test_result_after_clear_is_discarded() {
        let mut state = AppState::default();
        state.apply(Action::PostRequested(5));
        state.apply(Action::CurrentPostCleared);
        state.apply(Action::PostLoaded(post(5)));
        assert_eq!(state.current_post, PostSlot::Empty);

        state.apply(Action::PostMissing(5));
        assert_eq!(state.current_post, PostSlot::Empty);
    }

    #[test]
    fn test_result_for_other_id_is_discarded() {
        let mut state = AppState::default();
        state.apply(Action::PostRequested(5));
        state.apply(Action::PostRequested(6));
        state.apply(Action::PostLoaded(post(5)));
        assert_eq!(state.current_post, PostSlot::Loading { id: 6 });

        state.apply(Action::PostFailed {
            id: 6,
            error: "offline".to_string(),
        });
        assert!(matches!(state.current_post, PostSlot::Failed { id: 6, .. }));
    }

    #[test]
    fn test_missing_post() {
        let mut state = AppState::default();
        state.apply(Action::PostRequested(1));
        state.apply(Action::PostMissing(1));
        assert_eq!(state.current_post, PostSlot::Missing { id: 1 });
    }

    #[test]
    fn test_post_deleted_clears_matching_slot_only() {
        let mut state = AppState::default();
        state.apply(Action::PostRequested(3));
        state.apply(Action::PostLoaded(post(3)));
        state.apply(Action::PostDeleted(4));
        assert!(state.current_post.post().is_some());
        state.apply(Action::PostDeleted(3));
        assert_eq!(state.current_post, PostSlot::Empty);
    }

    #[test]
    fn test_chat_target() {
        let mut state = AppState::default();
        let profile = Profile {
            id: 9,
            user_id: Some(5),
            first: Some("Grace".to_string()),
            last: Some("Hopper".to_string()),
            ..Profile::default()
        };
        state.apply(Action::ProfileLoaded(profile.clone()));
        state.apply(Action::ChatTargetSelected(ChatTarget::for_profile(&profile).unwrap()));
        let target = state.chat_target.clone().unwrap();
        assert_eq!(target.id, "user-5");
        assert_eq!(target.name, "Grace Hopper");
        assert_eq!(target.role, Role::Volunteer);

        state.apply(Action::LoggedOut);
        assert_eq!(state.chat_target, None);
        assert!(state.profiles.is_empty());
    }

    #[test]
    fn test_chat_target_needs_an_account() {
        let orphan = Profile {
            id: 9,
            first: Some("Grace".to_string()),
            ..Profile::default()
        };
        assert_eq!(ChatTarget::for_profile(&orphan), None);

        let mut opportunity = post(3);
        assert_eq!(ChatTarget::for_owner(&opportunity), None);
        opportunity.owner = Some(11);
        let target = ChatTarget::for_owner(&opportunity).unwrap();
        assert_eq!(target.id, "user-11");
        assert_eq!(target.role, Role::Organization);
    }

    #[test]
    fn test_auth_error_is_cleared_without_touching_the_session() {
        let mut state = AppState::default();
        state.apply(Action::LoginFailed("Authentication was unsuccessful.".to_string()));
        state.apply(Action::AuthErrorCleared);
        assert_eq!(state.auth.error, None);
        assert!(state.auth.resolved);
        assert!(!state.auth.is_authenticated());

        state.apply(Action::LoginSucceeded(user(1, false)));
        state.apply(Action::AuthErrorCleared);
        assert!(state.auth.is_authenticated());
    }
}
