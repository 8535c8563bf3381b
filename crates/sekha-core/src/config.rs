//! Client configuration for the Sekha SDK.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{SekhaError, SekhaResult};

/// Default base URL for a locally running Sekha server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Prefix required of production API keys.
const KEY_PREFIX: &str = "sk-sekha-";
/// Prefix of test keys, which get a relaxed length check.
const TEST_KEY_PREFIX: &str = "sk-test-";

/// Configuration for a [`SekhaClient`](https://docs.rs/sekha-client).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API key, sent as a bearer token on every request.
    pub api_key: String,
    /// Base URL of the Sekha server.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Maximum attempts for retryable operations (including the first).
    pub max_retries: u32,
    /// Requests allowed per rate-limit window.
    pub rate_limit_requests: u32,
    /// Length of the rate-limit window.
    #[serde(with = "duration_secs")]
    pub rate_limit_window: Duration,
    /// Label applied when creating conversations without an explicit one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_label: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            rate_limit_requests: 1000,
            rate_limit_window: Duration::from_secs(60),
            default_label: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `SEKHA_API_KEY` (required) and `SEKHA_BASE_URL` (optional).
    pub fn from_env() -> SekhaResult<Self> {
        let api_key = std::env::var("SEKHA_API_KEY")
            .map_err(|_| SekhaError::Configuration("SEKHA_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("SEKHA_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum attempts for retryable operations.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the rate-limit budget.
    pub fn with_rate_limit(mut self, requests: u32, window: Duration) -> Self {
        self.rate_limit_requests = requests;
        self.rate_limit_window = window;
        self
    }

    /// Set the default label for new conversations.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = Some(label.into());
        self
    }

    /// Validate the configuration. Called at client construction.
    pub fn validate(&self) -> SekhaResult<()> {
        validate_api_key(&self.api_key)?;
        validate_base_url(&self.base_url)?;

        if self.timeout.is_zero() {
            return Err(SekhaError::Configuration(
                "timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate API key format.
///
/// Test keys (`sk-test-`) only need 20 characters; production keys must
/// carry the `sk-sekha-` prefix and be 32 to 128 characters long.
pub fn validate_api_key(api_key: &str) -> SekhaResult<()> {
    if api_key.is_empty() {
        return Err(SekhaError::Configuration("API key is required".to_string()));
    }

    if api_key.starts_with(TEST_KEY_PREFIX) {
        if api_key.len() < 20 {
            return Err(SekhaError::Configuration(
                "API key too short (min 20 characters for test keys)".to_string(),
            ));
        }
        return Ok(());
    }

    if api_key.len() < 32 {
        return Err(SekhaError::Configuration(
            "API key too short (must be at least 32 characters)".to_string(),
        ));
    }
    if !api_key.starts_with(KEY_PREFIX) {
        return Err(SekhaError::Configuration(format!(
            "API key must start with '{}'",
            KEY_PREFIX
        )));
    }
    if api_key.len() > 128 {
        return Err(SekhaError::Configuration(
            "API key too long (max 128 characters)".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the base URL parses and uses an http(s) scheme.
pub fn validate_base_url(base_url: &str) -> SekhaResult<()> {
    if base_url.is_empty() {
        return Err(SekhaError::Configuration(
            "base_url is required".to_string(),
        ));
    }

    let url = Url::parse(base_url)
        .map_err(|e| SekhaError::Configuration(format!("Invalid base_url: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(SekhaError::Configuration(format!(
            "base_url must use http or https, got '{}'",
            scheme
        ))),
    }
}

mod duration_secs {
    //! Serialize `Duration` as a float number of seconds.

    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("duration must be non-negative"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
