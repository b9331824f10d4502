//! Configuration types.
//!
//! Property binding lives with the caller; this module only defines the shapes
//! the pipeline consumes, their defaults, and serde support so any loader can
//! bind them. Durations are serialized as integer milliseconds.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Settings governing specification retrieval.
///
/// Treated as an immutable snapshot: the fetcher copies it at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchProperties {
    #[serde(rename = "connect_timeout_ms", with = "duration_millis")]
    pub connect_timeout: Duration,
    #[serde(rename = "read_timeout_ms", with = "duration_millis")]
    pub read_timeout: Duration,
    /// Retries after the first attempt; total attempts are `max_retries + 1`
    pub max_retries: u32,
    /// Seed delay for exponential backoff
    #[serde(rename = "retry_delay_ms", with = "duration_millis")]
    pub retry_delay: Duration,
    pub validate_url: bool,
    /// Maximum cached specifications; 0 disables caching
    pub cache_size: usize,
    #[serde(rename = "cache_ttl_ms", with = "duration_millis")]
    pub cache_ttl: Duration,
}

impl Default for FetchProperties {
    fn default() -> Self {
        Self {
            connect_timeout: defaults::fetch::CONNECT_TIMEOUT,
            read_timeout: defaults::fetch::READ_TIMEOUT,
            max_retries: defaults::fetch::MAX_RETRIES,
            retry_delay: defaults::fetch::RETRY_DELAY,
            validate_url: true,
            cache_size: defaults::fetch::CACHE_SIZE,
            cache_ttl: defaults::fetch::CACHE_TTL,
        }
    }
}

impl FetchProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub const fn with_validate_url(mut self, validate: bool) -> Self {
        self.validate_url = validate;
        self
    }

    pub const fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Whether successful fetches are cached
    pub const fn cache_enabled(&self) -> bool {
        self.cache_size > 0
    }
}

/// Ollama backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL (e.g., "http://localhost:11434")
    pub base_url: String,
    /// Model name (e.g., "llama3.2", "mistral:7b")
    pub model: String,
    pub temperature: f32,
    /// How long the model stays loaded after the request (e.g., "5m")
    pub keep_alive: Option<String>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::providers::ollama::BASE_URL.to_string(),
            model: defaults::providers::ollama::MODEL.to_string(),
            temperature: defaults::providers::ollama::TEMPERATURE,
            keep_alive: None,
        }
    }
}

impl OllamaConfig {
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn keep_alive<S: Into<String>>(mut self, duration: S) -> Self {
        self.keep_alive = Some(duration.into());
        self
    }
}

/// Hosted OpenAI (or OpenAI-compatible) backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Provider identifier exposed to callers
    pub name: String,
    pub base_url: String,
    /// Never serialized; set programmatically or read from `OPENAI_API_KEY`
    #[serde(skip)]
    pub api_key: Option<SecretString>,
    pub model: String,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            name: defaults::providers::openai::NAME.to_string(),
            base_url: defaults::providers::openai::BASE_URL.to_string(),
            api_key: None,
            model: defaults::providers::openai::MODEL.to_string(),
            temperature: defaults::providers::openai::TEMPERATURE,
        }
    }
}

impl OpenAiConfig {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Fill a missing API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none()
            && let Ok(key) = std::env::var(defaults::providers::openai::API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.api_key = Some(SecretString::from(key));
        }
        self
    }
}

/// Everything the pipeline consumes from its configuration surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub fetch: FetchProperties,
    /// Provider used when the caller omits one
    pub default_provider: String,
    pub ollama: OllamaConfig,
    /// Hosted backend; registered only when present and keyed
    pub openai: Option<OpenAiConfig>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            fetch: FetchProperties::default(),
            default_provider: defaults::providers::DEFAULT_PROVIDER.to_string(),
            ollama: OllamaConfig::default(),
            openai: None,
        }
    }
}

impl DocsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch(mut self, fetch: FetchProperties) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn default_provider<S: Into<String>>(mut self, provider: S) -> Self {
        self.default_provider = provider.into();
        self
    }

    pub fn ollama(mut self, ollama: OllamaConfig) -> Self {
        self.ollama = ollama;
        self
    }

    pub fn openai(mut self, openai: OpenAiConfig) -> Self {
        self.openai = Some(openai);
        self
    }
}

// Helper module for Duration serialization
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
