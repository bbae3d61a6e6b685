//! Client configuration
//!
//! Configuration is loaded from environment variables.

use std::env;
use url::Url;

/// Default base endpoint; room names are appended as a path segment.
const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8080/ws";

/// Main client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base WebSocket endpoint rooms are joined under
    pub endpoint: Url,
}

/// Per-session options supplied by the hosting surface.
///
/// Only `username` and `user_id` affect protocol behavior; `title` and
/// `display_theme` are cosmetic metadata carried for the host.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub title: String,
    pub username: String,
    pub user_id: String,
    pub display_theme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL is valid"),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            title: "Roomchat".to_string(),
            username: "guest".to_string(),
            user_id: "guest".to_string(),
            display_theme: "default".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("CHAT_WS_URL")
            && let Ok(url) = Url::parse(&val)
        {
            config.endpoint = url;
        }

        config
    }
}

impl SessionOptions {
    /// Load session options from environment variables
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(val) = env::var("CHAT_TITLE")
            && !val.is_empty()
        {
            options.title = val;
        }
        if let Ok(val) = env::var("CHAT_USERNAME")
            && !val.is_empty()
        {
            options.username = val.clone();
            options.user_id = val;
        }
        if let Ok(val) = env::var("CHAT_USER_ID")
            && !val.is_empty()
        {
            options.user_id = val;
        }
        if let Ok(val) = env::var("CHAT_THEME")
            && !val.is_empty()
        {
            options.display_theme = val;
        }

        options
    }
}
