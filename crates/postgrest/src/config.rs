//! Client configuration.
//!
//! The transport needs a base URL and the project API key. Both usually come
//! from the environment; the binary layer loads `.env` via `dotenvy` before
//! calling [`ClientConfig::from_env`].

use std::env;

/// Environment variable naming the backend base URL.
pub const ENV_API_URL: &str = "TASTELOG_API_URL";

/// Environment variable naming the project API key.
pub const ENV_API_KEY: &str = "TASTELOG_API_KEY";

/// Connection settings for [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base HTTP URL without a trailing slash, e.g. `https://x.supabase.co`.
    pub base_url: String,
    /// Project (anon) API key sent with every request.
    pub api_key: String,
}

/// Errors building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Read the configuration from `TASTELOG_API_URL` / `TASTELOG_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(ENV_API_URL).map_err(|_| ConfigError::MissingVar(ENV_API_URL))?;
        let api_key = env::var(ENV_API_KEY).map_err(|_| ConfigError::MissingVar(ENV_API_KEY))?;
        Ok(Self::new(base_url, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::new("https://example.test/", "key");
        assert_eq!(config.base_url, "https://example.test");
    }
}
