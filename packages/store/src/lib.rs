//! Client-side state for the Volunteer Match front-end: domain models, the
//! application store and its reducer, form drafts and validation, and the
//! persisted pieces (session, applicant review ledger) behind a key-value seam.

pub mod config;
pub mod form;
pub mod kv;
pub mod models;
pub mod review;
pub mod session;
pub mod state;
pub mod validation;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::AppConfig;
pub use form::{FormDraft, FormState};
pub use kv::KeyValueStore;
pub use models::{NewOpportunity, Opportunity, Profile, ProfileUpdate, Role, User};
pub use review::ReviewLedger;
pub use session::{Session, SessionStore};
pub use state::{chat_user_id, reduce, Action, AppState, AuthState, ChatTarget, PostSlot};
pub use validation::{validate, validate_all, ErrorMap};
