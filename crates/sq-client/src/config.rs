//! Client configuration and credentials.

use std::env;
use std::fmt;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://www.illustris-project.org/api";

/// Issued keys are always this long; anything else is a paste error.
pub const API_KEY_LEN: usize = 32;

pub const API_KEY_ENV: &str = "SIMQUERY_API_KEY";
pub const BASE_URL_ENV: &str = "SIMQUERY_BASE_URL";

/// Web API key, validated at construction so no request can carry a bad one.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> ClientResult<Self> {
        let key = key.into();
        if key.len() != API_KEY_LEN {
            return Err(ClientError::Config {
                what: format!(
                    "api key must be exactly {API_KEY_LEN} characters, got {}; \
                     find yours on the data portal under your profile",
                    key.len()
                ),
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// keys are credentials; never let one leak through a Debug dump
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.0.get(..4).unwrap_or("????");
        write!(f, "ApiKey(\"{head}...\")")
    }
}

/// Where to talk to and who we are.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    api_key: ApiKey,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Configuration from `SIMQUERY_API_KEY` (and optionally
    /// `SIMQUERY_BASE_URL`).
    pub fn from_env() -> ClientResult<Self> {
        let key = env::var(API_KEY_ENV).map_err(|_| ClientError::Config {
            what: format!("set {API_KEY_ENV} to your api key"),
        })?;
        let mut config = Self::new(ApiKey::new(key)?);
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn accepts_a_32_character_key() {
        let key = ApiKey::new(GOOD_KEY).unwrap();
        assert_eq!(key.as_str(), GOOD_KEY);
    }

    #[test]
    fn rejects_wrong_length_keys() {
        for bad in ["", "short", "WELLTHISDOESNTSEEMRIGHT"] {
            let err = ApiKey::new(bad).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("32"), "unhelpful message: {msg}");
        }
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let key = ApiKey::new(GOOD_KEY).unwrap();
        let dump = format!("{key:?}");
        assert!(dump.contains("0123..."));
        assert!(!dump.contains(GOOD_KEY));
    }

    #[test]
    fn base_url_trims_trailing_slashes() {
        let config = ClientConfig::new(ApiKey::new(GOOD_KEY).unwrap())
            .with_base_url("http://localhost:8080/api/");
        assert_eq!(config.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn default_base_url_points_at_the_public_service() {
        let config = ClientConfig::new(ApiKey::new(GOOD_KEY).unwrap());
        assert_eq!(config.base_url(), "http://www.illustris-project.org/api");
    }
}
