//! # Domain models for users, profiles and opportunities
//!
//! Defines the data structures the backend returns and the store holds. These
//! types are `Serialize + Deserialize` so they decode straight from the JSON
//! responses of the REST API and can be cached in the browser.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | An account. `is_org` decides the [`Role`]; the attached [`Profile`] carries the display fields. |
//! | [`Profile`] | Display fields of a volunteer or organization (`first`, `last`, `phone`, `bio`, `org_name`). |
//! | [`Opportunity`] | A post created by an organization, with the ids of the profiles that applied. |
//! | [`ProfileUpdate`] | The body of an update-profile request, built from a form draft. |
//! | [`NewOpportunity`] | The body of a create-post request. |

use serde::{Deserialize, Serialize};

use crate::form::FormDraft;

/// Role of an authenticated account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Volunteer,
    Organization,
}

impl Role {
    pub fn from_is_org(is_org: bool) -> Self {
        if is_org {
            Role::Organization
        } else {
            Role::Volunteer
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Volunteer => "Volunteer",
            Role::Organization => "Organization",
        }
    }
}

/// Account information returned by `/api/users/me/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_org: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_is_org(self.is_org)
    }

    /// Name shown in the navigation bar, falling back to the email address.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|p| p.display_name())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.email.clone())
    }
}

/// Public profile of a volunteer or organization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
}

impl Profile {
    /// Organization name, or "first last", or `None` when neither is filled in.
    pub fn display_name(&self) -> Option<String> {
        if let Some(org) = self.org_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return Some(org.to_string());
        }
        let full = [self.first.as_deref(), self.last.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!full.is_empty()).then_some(full)
    }

    /// Up to two uppercase initials for the avatar.
    pub fn initials(&self) -> String {
        self.display_name()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// An opportunity (post) created by an organization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Id of the organization account that owns the post.
    #[serde(default)]
    pub owner: Option<i64>,
    /// Profile ids of the volunteers who applied.
    #[serde(default)]
    pub applicants: Vec<i64>,
}

impl Opportunity {
    /// A post without a title is treated as missing by the views.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Body of an update-profile request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first: String,
    pub last: String,
    pub phone: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
}

impl ProfileUpdate {
    pub fn from_draft(draft: &FormDraft) -> Self {
        Self {
            first: draft.value("first").to_string(),
            last: draft.value("last").to_string(),
            phone: draft.value("phone").to_string(),
            bio: draft.value("bio").to_string(),
            org_name: draft.get("org_name").map(str::to_string),
        }
    }
}

/// Body of a create-post request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub location: String,
}

impl NewOpportunity {
    pub fn from_draft(draft: &FormDraft) -> Self {
        Self {
            title: draft.value("title").trim().to_string(),
            description: draft.value("description").trim().to_string(),
            location: draft.value("location").trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_backend_shape() {
        let json = r#"{
            "id": 7,
            "email": "org@example.com",
            "is_org": true,
            "created_at": "2022-01-01T00:00:00",
            "profile": {"id": 3, "user_id": 7, "org_name": "Harbour Cleanup"}
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role(), Role::Organization);
        assert_eq!(user.display_name(), "Harbour Cleanup");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User {
            id: 1,
            email: "vol@example.com".to_string(),
            username: None,
            is_org: false,
            profile: Some(Profile::default()),
        };
        assert_eq!(user.display_name(), "vol@example.com");
        assert_eq!(user.role(), Role::Volunteer);
    }

    #[test]
    fn test_initials() {
        let profile = Profile {
            first: Some("ada".to_string()),
            last: Some("lovelace".to_string()),
            ..Profile::default()
        };
        assert_eq!(profile.initials(), "AL");
        assert_eq!(Profile::default().initials(), "");
    }

    #[test]
    fn test_opportunity_without_title_is_incomplete() {
        let post: Opportunity = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(!post.is_complete());
        assert!(post.applicants.is_empty());
    }

    #[test]
    fn test_profile_update_from_draft() {
        let mut draft = FormDraft::with_fields(&["first", "last", "phone", "bio"]);
        draft.set("first", "Grace");
        draft.set("bio", "Sailor");
        let update = ProfileUpdate::from_draft(&draft);
        assert_eq!(update.first, "Grace");
        assert_eq!(update.last, "");
        assert_eq!(update.bio, "Sailor");
        assert_eq!(update.org_name, None);
    }
}
