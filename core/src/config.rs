//! Client configuration.
//!
//! `ClientConfig` is plain data and deserializes with serde, so it can be
//! embedded in a host application's own config file. `from_env` covers the
//! common case of pointing the client at the sandbox or a local mock.

use serde::Deserialize;

pub const SANDBOX_BASE_URL: &str = "https://express.api.dhl.com/mydhlapi/test";
pub const PRODUCTION_BASE_URL: &str = "https://express.api.dhl.com/mydhlapi";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MYDHL_BASE_URL";
/// Environment variable setting the `accept-language` header.
pub const ACCEPT_LANGUAGE_ENV: &str = "MYDHL_ACCEPT_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Three-letter language code sent as `accept-language`, e.g. `eng`.
    #[serde(default)]
    pub accept_language: Option<String>,
}

fn default_base_url() -> String {
    SANDBOX_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::sandbox()
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            accept_language: None,
        }
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_BASE_URL)
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION_BASE_URL)
    }

    /// Sandbox defaults overridden by `MYDHL_BASE_URL` and
    /// `MYDHL_ACCEPT_LANGUAGE` when they are set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::sandbox();
        if let Some(url) = non_empty(BASE_URL_ENV) {
            config.base_url = url;
        }
        config.accept_language = non_empty(ACCEPT_LANGUAGE_ENV);
        config
    }

    pub fn with_accept_language(mut self, language: &str) -> Self {
        self.accept_language = Some(language.to_string());
        self
    }
}
