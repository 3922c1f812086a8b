//! Request and response bodies of the REST API that have no counterpart in
//! [`store::models`].

use serde::{Deserialize, Serialize};
use store::{NewOpportunity, ProfileUpdate};

/// Credentials and handle of a new account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// `{"access_token": "...", "token_type": "bearer"}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// Registration answers with the public user and its freshly issued token.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RegisteredUser {
    pub access_token: AccessToken,
}

#[derive(Serialize)]
pub(crate) struct NewUserBody<'a> {
    pub new_user: &'a NewUser,
}

#[derive(Serialize)]
pub(crate) struct NewPostBody<'a> {
    pub new_post: &'a NewOpportunity,
}

#[derive(Serialize)]
pub(crate) struct ProfileUpdateBody<'a> {
    pub profile_update: &'a ProfileUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_are_embedded() {
        let user = NewUser {
            email: "a@b.org".to_string(),
            username: "ab_c".to_string(),
            password: "hunter22".to_string(),
        };
        let json = serde_json::to_value(NewUserBody { new_user: &user }).unwrap();
        assert_eq!(json["new_user"]["email"], "a@b.org");

        let update = ProfileUpdate::default();
        let json = serde_json::to_value(ProfileUpdateBody {
            profile_update: &update,
        })
        .unwrap();
        assert!(json["profile_update"].get("org_name").is_none());
    }

    #[test]
    fn test_registered_user_token() {
        let body = r#"{"id":1,"email":"a@b.org","access_token":{"access_token":"xyz","token_type":"bearer"}}"#;
        let registered: RegisteredUser = serde_json::from_str(body).unwrap();
        assert_eq!(registered.access_token.access_token, "xyz");
    }
}
