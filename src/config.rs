//! Signup endpoint configuration
//!
//! Holds the API base, the bearer credential and the request timeout. The
//! credential is supplied by the hosting environment and never logged.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::ConfigError;

pub const ENV_API_BASE_URL: &str = "SIGNUP_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "SIGNUP_API_TOKEN";
pub const ENV_TIMEOUT_MS: &str = "SIGNUP_TIMEOUT_MS";

/// Default request timeout (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Path of the signup endpoint, relative to the versioned API base.
const SIGNUP_PATH: &str = "signup";

#[derive(Debug)]
pub struct SignupConfig {
    api_base_url: Url,
    credential: SecretString,
    timeout: Duration,
}

impl SignupConfig {
    /// Creates a config for `api_base_url` (for example
    /// `https://api.example.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the base cannot be parsed or is
    /// not http(s).
    pub fn new(api_base_url: &str, credential: SecretString) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            credential,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Loads the config from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNUP_API_BASE_URL`: versioned API base (required)
    /// - `SIGNUP_API_TOKEN`: bearer credential (required)
    /// - `SIGNUP_TIMEOUT_MS`: request timeout in milliseconds
    ///   (default: 10000)
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A required variable is unset or blank
    /// - The base URL is invalid
    /// - The timeout is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = read_env(ENV_API_BASE_URL).ok_or(ConfigError::MissingVar(ENV_API_BASE_URL))?;
        let token = read_env(ENV_API_TOKEN).ok_or(ConfigError::MissingVar(ENV_API_TOKEN))?;

        let mut config = Self::new(&base, SecretString::new(token.into()))?;
        if let Some(raw) = read_env(ENV_TIMEOUT_MS) {
            config.timeout = parse_timeout(&raw)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Signup config loaded: base {} timeout {:?}",
            config.api_base_url,
            config.timeout
        );

        Ok(config)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the signup endpoint.
    pub fn signup_url(&self) -> String {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        format!("{}/{}", base, SIGNUP_PATH)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("unsupported scheme {scheme}"))),
    }
    if url.host().is_none() {
        return Err(invalid("no host specified".to_string()));
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
