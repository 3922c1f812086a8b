use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ApiError;
use crate::wire::{AccessToken, NewUser};
use crate::Backend;
use store::{NewOpportunity, Opportunity, Profile, ProfileUpdate, Role, User};

/// One call recorded by [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Login { email: String },
    Register { email: String, role: Role },
    CurrentUser,
    ListPosts { offset: u32, limit: u32 },
    FetchPost(i64),
    CreatePost(NewOpportunity),
    DeletePost(i64),
    FetchProfile(i64),
    UpdateProfile(ProfileUpdate),
}

#[derive(Debug, Default)]
struct Inner {
    accounts: BTreeMap<String, (String, User)>,
    tokens: BTreeMap<String, i64>,
    posts: BTreeMap<i64, Opportunity>,
    profiles: BTreeMap<i64, Profile>,
    requests: Vec<Request>,
    offline: bool,
    reject_profile_updates: Option<ApiError>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_for(&self, token: &str) -> Result<User, ApiError> {
        let id = self
            .tokens
            .get(token)
            .ok_or_else(|| ApiError::Unauthorized("Could not validate token credentials.".to_string()))?;
        self.accounts
            .values()
            .map(|(_, user)| user)
            .find(|user| user.id == *id)
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Unknown account.".to_string()))
    }
}

/// In-process Backend for testing and offline demos.
///
/// Clones share state, so a test can keep a handle while views hold another.
/// Every call is appended to a request log before it is answered.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds an account with an empty profile and returns it.
    pub fn add_account(&self, email: &str, password: &str, role: Role) -> User {
        let mut inner = self.lock();
        let user_id = inner.next_id();
        let profile_id = inner.next_id();
        let profile = Profile {
            id: profile_id,
            user_id: Some(user_id),
            ..Profile::default()
        };
        let user = User {
            id: user_id,
            email: email.to_string(),
            username: None,
            is_org: role == Role::Organization,
            profile: Some(profile.clone()),
        };
        inner.profiles.insert(profile_id, profile);
        inner
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    /// Issues a token for an existing account without going through `login`.
    pub fn issue_token(&self, user: &User) -> String {
        let mut inner = self.lock();
        let token = format!("token-{}-{}", user.id, inner.tokens.len());
        inner.tokens.insert(token.clone(), user.id);
        token
    }

    pub fn add_post(&self, post: Opportunity) {
        self.lock().posts.insert(post.id, post);
    }

    pub fn add_profile(&self, profile: Profile) {
        self.lock().profiles.insert(profile.id, profile);
    }

    /// Makes every following call fail with [`ApiError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Makes profile updates fail with `error` (or succeed again with `None`).
    pub fn reject_profile_updates(&self, error: Option<ApiError>) {
        self.lock().reject_profile_updates = error;
    }

    /// Every call made so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    fn begin(&self, request: Request) -> Result<MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.lock();
        inner.requests.push(request);
        if inner.offline {
            return Err(ApiError::Network("backend offline".to_string()));
        }
        Ok(inner)
    }
}

impl Backend for MemoryBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        let mut inner = self.begin(Request::Login {
            email: email.to_string(),
        })?;
        let user_id = match inner.accounts.get(email) {
            Some((stored, user)) if stored == password => user.id,
            _ => {
                return Err(ApiError::Unauthorized(
                    "Authentication was unsuccessful.".to_string(),
                ))
            }
        };
        let token = format!("token-{user_id}-{}", inner.tokens.len());
        inner.tokens.insert(token.clone(), user_id);
        Ok(AccessToken {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    async fn register(&self, new_user: &NewUser, role: Role) -> Result<AccessToken, ApiError> {
        {
            let inner = self.begin(Request::Register {
                email: new_user.email.clone(),
                role,
            })?;
            if inner.accounts.contains_key(&new_user.email) {
                return Err(ApiError::Status {
                    status: 400,
                    message: "That email is already taken. Login or try another.".to_string(),
                });
            }
        }
        let user = self.add_account(&new_user.email, &new_user.password, role);
        {
            let mut inner = self.lock();
            if let Some((_, stored)) = inner.accounts.get_mut(&new_user.email) {
                stored.username = Some(new_user.username.clone());
            }
        }
        Ok(AccessToken {
            access_token: self.issue_token(&user),
            token_type: "bearer".to_string(),
        })
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let inner = self.begin(Request::CurrentUser)?;
        let mut user = inner.user_for(token)?;
        if let Some(profile) = user.profile.as_ref().and_then(|p| inner.profiles.get(&p.id)) {
            user.profile = Some(profile.clone());
        }
        Ok(user)
    }

    async fn list_posts(&self, offset: u32, limit: u32) -> Result<Vec<Opportunity>, ApiError> {
        let inner = self.begin(Request::ListPosts { offset, limit })?;
        Ok(inner
            .posts
            .values()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_post(&self, id: i64) -> Result<Opportunity, ApiError> {
        let inner = self.begin(Request::FetchPost(id))?;
        inner.posts.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_post(&self, token: &str, post: &NewOpportunity) -> Result<Opportunity, ApiError> {
        let mut inner = self.begin(Request::CreatePost(post.clone()))?;
        let user = inner.user_for(token)?;
        if !user.is_org {
            return Err(ApiError::Unauthorized(
                "Only organisations can create posts.".to_string(),
            ));
        }
        let id = inner.next_id();
        let created = Opportunity {
            id,
            title: post.title.clone(),
            description: post.description.clone(),
            location: (!post.location.is_empty()).then(|| post.location.clone()),
            owner: Some(user.id),
            applicants: Vec::new(),
        };
        inner.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_post(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let mut inner = self.begin(Request::DeletePost(id))?;
        let user = inner.user_for(token)?;
        let owner = inner.posts.get(&id).ok_or(ApiError::NotFound)?.owner;
        if owner != Some(user.id) {
            return Err(ApiError::Unauthorized(
                "Users are only able to delete posts that they created.".to_string(),
            ));
        }
        inner.posts.remove(&id);
        Ok(())
    }

    async fn fetch_profile(&self, id: i64) -> Result<Profile, ApiError> {
        let inner = self.begin(Request::FetchProfile(id))?;
        inner.profiles.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let mut inner = self.begin(Request::UpdateProfile(update.clone()))?;
        if let Some(error) = inner.reject_profile_updates.clone() {
            return Err(error);
        }
        let user = inner.user_for(token)?;
        let profile_id = user
            .profile
            .as_ref()
            .map(|p| p.id)
            .ok_or(ApiError::NotFound)?;
        let profile = inner.profiles.entry(profile_id).or_default();
        profile.id = profile_id;
        profile.user_id = Some(user.id);
        profile.first = Some(update.first.clone());
        profile.last = Some(update.last.clone());
        profile.phone = Some(update.phone.clone());
        profile.bio = Some(update.bio.clone());
        if update.org_name.is_some() {
            profile.org_name = update.org_name.clone();
        }
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Opportunity {
        Opportunity {
            id,
            title: title.to_string(),
            ..Opportunity::default()
        }
    }

    #[tokio::test]
    async fn test_login_and_current_user() {
        let backend = MemoryBackend::new();
        let user = backend.add_account("org@example.org", "password1", Role::Organization);

        let err = backend.login("org@example.org", "nope").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let token = backend.login("org@example.org", "password1").await.unwrap();
        let me = backend.current_user(&token.access_token).await.unwrap();
        assert_eq!(me.id, user.id);
        assert_eq!(me.role(), Role::Organization);

        assert!(matches!(
            backend.current_user("forged").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let backend = MemoryBackend::new();
        let new_user = NewUser {
            email: "vol@example.org".to_string(),
            username: "vol".to_string(),
            password: "password1".to_string(),
        };
        let token = backend.register(&new_user, Role::Volunteer).await.unwrap();
        let me = backend.current_user(&token.access_token).await.unwrap();
        assert_eq!(me.username.as_deref(), Some("vol"));

        let err = backend.register(&new_user, Role::Volunteer).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_fetch_missing_post_is_not_found() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.fetch_post(1).await, Err(ApiError::NotFound));
        assert_eq!(backend.requests(), vec![Request::FetchPost(1)]);
    }

    #[tokio::test]
    async fn test_list_posts_newest_first_with_paging() {
        let backend = MemoryBackend::new();
        for id in 1..=5 {
            backend.add_post(post(id, &format!("Post {id}")));
        }
        let page: Vec<i64> = backend
            .list_posts(0, 3)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(page, vec![5, 4, 3]);
        let page: Vec<i64> = backend
            .list_posts(3, 3)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(page, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_only_owner_org_creates_and_deletes() {
        let backend = MemoryBackend::new();
        let org = backend.add_account("org@example.org", "password1", Role::Organization);
        let other = backend.add_account("other@example.org", "password1", Role::Organization);
        let volunteer = backend.add_account("vol@example.org", "password1", Role::Volunteer);
        let new_post = NewOpportunity {
            title: "Beach cleanup".to_string(),
            description: "Bring gloves".to_string(),
            location: String::new(),
        };

        let vol_token = backend.issue_token(&volunteer);
        assert!(backend.create_post(&vol_token, &new_post).await.is_err());

        let org_token = backend.issue_token(&org);
        let created = backend.create_post(&org_token, &new_post).await.unwrap();
        assert_eq!(created.owner, Some(org.id));
        assert_eq!(created.location, None);

        let other_token = backend.issue_token(&other);
        assert!(backend.delete_post(&other_token, created.id).await.is_err());
        backend.delete_post(&org_token, created.id).await.unwrap();
        assert_eq!(backend.fetch_post(created.id).await, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_update_profile_and_rejection() {
        let backend = MemoryBackend::new();
        let user = backend.add_account("vol@example.org", "password1", Role::Volunteer);
        let token = backend.issue_token(&user);
        let update = ProfileUpdate {
            first: "Ada".to_string(),
            last: "Lovelace".to_string(),
            phone: String::new(),
            bio: "Engines".to_string(),
            org_name: None,
        };

        let profile = backend.update_profile(&token, &update).await.unwrap();
        assert_eq!(profile.first.as_deref(), Some("Ada"));
        let me = backend.current_user(&token).await.unwrap();
        assert_eq!(me.display_name(), "Ada Lovelace");

        backend.reject_profile_updates(Some(ApiError::Status {
            status: 422,
            message: "bad".to_string(),
        }));
        assert!(backend.update_profile(&token, &update).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_records_and_fails() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        assert!(matches!(
            backend.fetch_profile(2).await,
            Err(ApiError::Network(_))
        ));
        assert_eq!(backend.requests(), vec![Request::FetchProfile(2)]);
    }
}
