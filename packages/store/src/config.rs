//! # Application configuration: `volunteer-match.toml`
//!
//! Defines the TOML configuration the web binary embeds at build time
//! (filename: [`AppConfig::filename`] = `"volunteer-match.toml"`). It tells the
//! front-end where the backend lives, how the session is persisted, and which
//! hosted chat app to talk to.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [session]
//! storage_prefix = "volunteer_match"
//! ttl_secs = 604800                 # 7 days
//!
//! [posts]
//! page_size = 3
//!
//! [chat]
//! app_id = ""                       # empty disables the chat widget
//! counterpart_id = "support"
//! counterpart_name = "Volunteer Match"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL. |
//! | [`SessionConfig`] | `localStorage` key prefix and session lifetime. |
//! | [`PostsConfig`] | Page size of the opportunity list. |
//! | [`ChatConfig`] | Hosted chat app id and the fallback conversation partner. |
//!
//! All structs derive `Default` with production defaults, so a missing or empty
//! file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `volunteer-match.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub posts: PostsConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prefix of every `localStorage` key owned by the session.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
    /// Lifetime of a session in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: i64,
}

fn default_storage_prefix() -> String {
    "volunteer_match".to_string()
}

fn default_ttl_secs() -> i64 {
    60 * 60 * 24 * 7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_prefix: default_storage_prefix(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    3
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Hosted chat widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// App id of the hosted chat service. Empty disables the widget.
    #[serde(default)]
    pub app_id: String,
    /// Participant used when no conversation partner was picked in the app.
    #[serde(default = "default_counterpart_id")]
    pub counterpart_id: String,
    #[serde(default = "default_counterpart_name")]
    pub counterpart_name: String,
}

fn default_counterpart_id() -> String {
    "support".to_string()
}

fn default_counterpart_name() -> String {
    "Volunteer Match".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            counterpart_id: default_counterpart_id(),
            counterpart_name: default_counterpart_name(),
        }
    }
}

impl ChatConfig {
    pub fn is_enabled(&self) -> bool {
        !self.app_id.trim().is_empty()
    }
}

impl AppConfig {
    /// Builder method to point at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "volunteer-match.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Parse from TOML, falling back to the defaults on a malformed file.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("Invalid {}: {e}; using defaults", Self::filename());
            Self::default()
        })
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.posts.page_size, 3);
        assert!(!config.chat.is_enabled());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.example.org/"

            [chat]
            app_id = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert!(config.chat.is_enabled());
        assert_eq!(config.chat.counterpart_id, "support");
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_malformed_falls_back() {
        let config = AppConfig::from_toml_or_default("[api\nbase_url = 3");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default().with_base_url("http://backend:9000/");
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
