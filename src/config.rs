//! Client configuration.

use serde::Deserialize;

/// Everything a [`Client`](crate::Client) needs besides the user token.
///
/// Fixed once the client is built. Per-call base URL selection happens on the
/// request, never here.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application (consumer) key.
    pub consumer_key: String,
    /// Application (consumer) secret.
    pub consumer_secret: String,
    /// Base for REST resources such as `statuses/update.json`.
    #[serde(default = "default_api_url_base")]
    pub api_url_base: String,
    /// Base for `request_token`, `authorize` and `access_token`.
    #[serde(default = "default_oauth_url_base")]
    pub oauth_url_base: String,
    /// Base for `media/upload.json`.
    #[serde(default = "default_upload_url_base")]
    pub upload_url_base: String,
    /// Sent as `User-Agent` with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Log URLs, signature base strings and signatures at `debug` level.
    #[serde(default)]
    pub debug_log: bool,
}

impl Config {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            api_url_base: default_api_url_base(),
            oauth_url_base: default_oauth_url_base(),
            upload_url_base: default_upload_url_base(),
            user_agent: default_user_agent(),
            debug_log: false,
        }
    }

    pub fn api_url_base<T: Into<String>>(self, api_url_base: T) -> Self {
        Config {
            api_url_base: api_url_base.into(),
            ..self
        }
    }

    pub fn oauth_url_base<T: Into<String>>(self, oauth_url_base: T) -> Self {
        Config {
            oauth_url_base: oauth_url_base.into(),
            ..self
        }
    }

    pub fn upload_url_base<T: Into<String>>(self, upload_url_base: T) -> Self {
        Config {
            upload_url_base: upload_url_base.into(),
            ..self
        }
    }

    pub fn user_agent<T: Into<String>>(self, user_agent: T) -> Self {
        Config {
            user_agent: user_agent.into(),
            ..self
        }
    }

    pub fn debug_log(self, debug_log: bool) -> Self {
        Config { debug_log, ..self }
    }
}

fn default_api_url_base() -> String {
    "https://api.twitter.com/1.1/".to_string()
}

fn default_oauth_url_base() -> String {
    "https://api.twitter.com/oauth/".to_string()
}

fn default_upload_url_base() -> String {
    "https://upload.twitter.com/1.1/".to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}
