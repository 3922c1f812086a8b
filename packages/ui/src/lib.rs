//! This crate contains all shared UI for the workspace: the store context,
//! route guards, the forms and the views.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod storage;
pub use storage::{make_storage, PlatformStorage};

mod provider;
pub use provider::{
    use_auth, use_chat_target, use_current_post, use_services, use_store, AppProvider, AppStore,
    Services,
};

pub mod auth;
pub use auth::{restore_session, sign_in, sign_out, sign_up, LogoutButton};

pub mod guard;
pub use guard::{Guard, GuardDecision, OrgRoute, ProfileRoute, ProtectedRoute, RedirectTarget, RouteGuard};

mod form_field;
pub use form_field::FormField;

pub mod profile_edit;
pub use profile_edit::{ProfileEditForm, ProfileKind, SubmitError};

pub mod applicants;
pub use applicants::{applicants_phase, ApplicantsPhase, OpportunityApplicantsView};

pub mod chat;
pub use chat::{ChatError, ChatView, LeaseSlot, TalkJsHost, WidgetHost, WidgetLease};

mod navbar;
pub use navbar::{Navbar, PageChrome};

pub mod views;
