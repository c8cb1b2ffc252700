//! Camb AI client configuration

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CAMB_API_KEY";

/// Prefix for environment overrides (`CAMB_BASE_URL`, `CAMB_MAX_ATTEMPTS`, ...)
const ENV_PREFIX: &str = "CAMB";

/// Configuration for the Camb AI client
#[derive(Clone, Serialize, Deserialize)]
pub struct CambConfig {
    /// API key sent as `x-api-key` (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between two status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of status polls before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Directory TTS audio is written to
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

impl std::fmt::Debug for CambConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CambConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_attempts", &self.max_attempts)
            .field("output_directory", &self.output_directory)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://client.camb.ai/apis".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_poll_interval_ms() -> u64 {
    2000
}

const fn default_max_attempts() -> u32 {
    300
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("audio_tts")
}

impl Default for CambConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            output_directory: default_output_directory(),
        }
    }
}

/// Pacing of the status polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between two status requests
    pub interval: Duration,
    /// Upper bound on status requests
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(default_poll_interval_ms()),
            max_attempts: default_max_attempts(),
        }
    }
}

impl CambConfig {
    /// Load configuration from defaults, an optional `cambai.toml` and the environment
    ///
    /// Environment variables use the `CAMB_` prefix, so `CAMB_API_KEY` sets
    /// `api_key` and `CAMB_POLL_INTERVAL_MS` sets `poll_interval_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading the given file instead of `cambai.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("cambai").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // CAMB_API_KEY, CAMB_BASE_URL, CAMB_MAX_ATTEMPTS, ...
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some(SecretString::from("test-api-key")),
            base_url: base_url.to_string(),
            timeout_secs: 5,
            poll_interval_ms: 5,
            max_attempts: 10,
            ..Default::default()
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Fill in the API key from `CAMB_API_KEY` if none is configured
    #[must_use]
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from);
        }
        self
    }

    /// Check whether an API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Polling pacing derived from this configuration
    #[must_use]
    pub const fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_attempts,
        }
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base_url is not a valid URL: {}", self.base_url));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }

        Ok(())
    }
}
