//! # API crate: client side of the Volunteer Match REST API
//!
//! Every backend call the views make goes through the [`Backend`] trait. The
//! production implementation ([`HttpBackend`]) speaks JSON over HTTP with
//! `reqwest`; [`MemoryBackend`] keeps the same behaviour in process for tests
//! and offline demos.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `reqwest`-based [`HttpBackend`], one request per operation, bearer auth |
//! | [`memory`] | [`MemoryBackend`], an in-process backend with a request log |
//! | [`error`] | [`ApiError`], the error every operation returns |
//! | [`wire`] | request/response bodies that are not domain models |
//!
//! ## Operations
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`Backend::login`] | `POST /api/users/login/token/` (form body) |
//! | [`Backend::register`] | `POST /api/users/` or `POST /api/users/org/` |
//! | [`Backend::current_user`] | `GET /api/users/me/` |
//! | [`Backend::list_posts`] | `GET /api/posts/?offset=&limit=` |
//! | [`Backend::fetch_post`] | `GET /api/posts/{id}/` |
//! | [`Backend::create_post`] | `POST /api/posts/` |
//! | [`Backend::delete_post`] | `DELETE /api/posts/{id}/` |
//! | [`Backend::fetch_profile`] | `GET /api/profiles/{id}` |
//! | [`Backend::update_profile`] | `PUT /api/profiles/me/` |
//!
//! Operations that need an account take the bearer token explicitly; the
//! caller owns the session.

use std::future::Future;

pub mod client;
pub mod error;
pub mod memory;
pub mod wire;

pub use client::HttpBackend;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use wire::{AccessToken, NewUser};

pub use store::{NewOpportunity, Opportunity, Profile, ProfileUpdate, Role, User};

/// Async interface to the backend.
pub trait Backend {
    /// Exchanges credentials for a bearer token.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AccessToken, ApiError>>;

    /// Creates a volunteer or organization account and returns its token.
    fn register(
        &self,
        new_user: &NewUser,
        role: Role,
    ) -> impl Future<Output = Result<AccessToken, ApiError>>;

    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, ApiError>>;

    fn list_posts(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Opportunity>, ApiError>>;

    fn fetch_post(&self, id: i64) -> impl Future<Output = Result<Opportunity, ApiError>>;

    /// Organization accounts only.
    fn create_post(
        &self,
        token: &str,
        post: &NewOpportunity,
    ) -> impl Future<Output = Result<Opportunity, ApiError>>;

    /// Only the owning organization may delete a post.
    fn delete_post(&self, token: &str, id: i64) -> impl Future<Output = Result<(), ApiError>>;

    fn fetch_profile(&self, id: i64) -> impl Future<Output = Result<Profile, ApiError>>;

    /// Replaces the signed-in account's profile fields and returns the stored profile.
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<Profile, ApiError>>;
}
