//! `reqwest`-backed [`Backend`] used by the web build.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::wire::{AccessToken, NewPostBody, NewUser, NewUserBody, ProfileUpdateBody, RegisteredUser};
use crate::Backend;
use store::{NewOpportunity, Opportunity, Profile, ProfileUpdate, Role, User};

/// HTTP client for the REST API rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API path such as `"/api/posts/1/"`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("API error {status}: {body}");
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        let request = self
            .client
            .post(self.url("/api/users/login/token/"))
            .form(&[("username", email), ("password", password)]);
        self.send_json(request).await
    }

    async fn register(&self, new_user: &NewUser, role: Role) -> Result<AccessToken, ApiError> {
        let path = match role {
            Role::Volunteer => "/api/users/",
            Role::Organization => "/api/users/org/",
        };
        let request = self
            .client
            .post(self.url(path))
            .json(&NewUserBody { new_user });
        let registered: RegisteredUser = self.send_json(request).await?;
        Ok(registered.access_token)
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let request = self
            .client
            .get(self.url("/api/users/me/"))
            .bearer_auth(token);
        self.send_json(request).await
    }

    async fn list_posts(&self, offset: u32, limit: u32) -> Result<Vec<Opportunity>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/posts/"))
            .query(&[("offset", offset), ("limit", limit)]);
        self.send_json(request).await
    }

    async fn fetch_post(&self, id: i64) -> Result<Opportunity, ApiError> {
        let request = self.client.get(self.url(&format!("/api/posts/{id}/")));
        self.send_json(request).await
    }

    async fn create_post(&self, token: &str, post: &NewOpportunity) -> Result<Opportunity, ApiError> {
        let request = self
            .client
            .post(self.url("/api/posts/"))
            .bearer_auth(token)
            .json(&NewPostBody { new_post: post });
        self.send_json(request).await
    }

    async fn delete_post(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/posts/{id}/")))
            .bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_profile(&self, id: i64) -> Result<Profile, ApiError> {
        let request = self.client.get(self.url(&format!("/api/profiles/{id}")));
        self.send_json(request).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let request = self
            .client
            .put(self.url("/api/profiles/me/"))
            .bearer_auth(token)
            .json(&ProfileUpdateBody {
                profile_update: update,
            });
        self.send_json(request).await
    }
}
