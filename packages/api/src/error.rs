//! Errors returned by every [`crate::Backend`] call.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    /// Missing, expired or insufficient credentials (401/403).
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-success status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| body.trim().to_string());
        match status {
            404 => ApiError::NotFound,
            401 | 403 => ApiError::Unauthorized(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::NotFound => "Not found.".to_string(),
            ApiError::Unauthorized(msg) | ApiError::Status { message: msg, .. }
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            ApiError::Unauthorized(_) => "You are not allowed to do that.".to_string(),
            ApiError::Status { status, .. } => format!("The server answered {status}."),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::from_status(status.as_u16(), "")
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

/// The backend answers either `{"detail": "text"}` or a list of field errors.
#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
struct FieldError {
    msg: String,
}

fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Detail::Text(text) => Some(text),
        Detail::Fields(fields) => Some(
            fields
                .into_iter()
                .map(|f| f.msg)
                .collect::<Vec<_>>()
                .join("; "),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(401, r#"{"detail":"Could not validate token credentials."}"#),
            ApiError::Unauthorized("Could not validate token credentials.".to_string())
        );
        assert_eq!(
            ApiError::from_status(400, r#"{"detail":"That email is already taken. Login or try another."}"#),
            ApiError::Status {
                status: 400,
                message: "That email is already taken. Login or try another.".to_string()
            }
        );
    }

    #[test]
    fn test_field_error_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error.email"}]}"#;
        assert_eq!(
            ApiError::from_status(422, body).user_message(),
            "value is not a valid email address"
        );
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(
            ApiError::from_status(500, "").user_message(),
            "The server answered 500."
        );
        assert_eq!(
            ApiError::Unauthorized(String::new()).user_message(),
            "You are not allowed to do that."
        );
    }
}
