//! Core error types

use thiserror::Error;

/// Failures raised while retrieving a raw specification.
///
/// `InvalidUrl` is produced locally before any network traffic and is never
/// retried. Every other variant describes a remote or transport failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to fetch OpenAPI specification: invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch OpenAPI specification: error fetching {url}: {status} {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to fetch OpenAPI specification from {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to fetch OpenAPI specification from {url}: body exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("Failed to fetch OpenAPI specification from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to fetch OpenAPI specification after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Transport-level failure from the HTTP client
    pub fn transport(url: impl Into<String>, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            format!("request failed: {err}")
        };
        Self::Transport {
            url: url.into(),
            message,
        }
    }

    /// URL the failed fetch targeted
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Status { url, .. }
            | Self::Transport { url, .. }
            | Self::TooLarge { url, .. }
            | Self::Decode { url, .. }
            | Self::RetriesExhausted { url, .. } => url,
        }
    }

    /// HTTP status of the remote failure, looking through retry wrapping
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RetriesExhausted { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Whether this failure was detected locally, before any network call
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }

    /// Innermost failure, unwrapping `RetriesExhausted`
    pub fn root(&self) -> &FetchError {
        match self {
            Self::RetriesExhausted { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Coarse classification used for logging and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Specification could not be retrieved
    Fetch,
    /// Specification retrieved but not understood
    Spec,
    /// Provider resolution or completion failure
    Generation,
    /// Invalid local configuration
    Configuration,
    /// Caller abandoned the request
    Cancelled,
}

/// Errors surfaced by the documentation pipeline.
///
/// Each kind is raised at its origin and passed through unchanged; no stage
/// reclassifies an upstream error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid or unsupported OpenAPI spec: {reason}")]
    IllegalSpec { reason: String },

    #[error("Unsupported AI provider: {provider} (supported: {})", .supported.join(", "))]
    UnsupportedProvider {
        provider: String,
        supported: Vec<String>,
    },

    #[error("Failed to generate documentation with {provider}: {message}")]
    GenerationFailed {
        provider: String,
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Documentation generation was cancelled")]
    Cancelled,
}

impl DocError {
    /// IllegalSpec naming both attempted formats
    pub fn illegal_spec(detail: impl AsRef<str>) -> Self {
        let detail = detail.as_ref();
        let reason = if detail.is_empty() {
            "tried both OpenAPI v3 and Swagger v2".to_string()
        } else {
            format!("tried both OpenAPI v3 and Swagger v2 ({detail})")
        };
        Self::IllegalSpec { reason }
    }

    pub fn unsupported_provider(provider: impl Into<String>, supported: Vec<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
            supported,
        }
    }

    pub fn generation_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            provider: provider.into(),
            message: message.into(),
            status: None,
        }
    }

    /// GenerationFailed carrying the backend's HTTP status
    pub fn generation_http(provider: impl Into<String>, status: u16, body: impl AsRef<str>) -> Self {
        Self::GenerationFailed {
            provider: provider.into(),
            message: format!("backend responded with {status}: {}", body.as_ref()),
            status: Some(status),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(_) => ErrorCategory::Fetch,
            Self::IllegalSpec { .. } => ErrorCategory::Spec,
            Self::UnsupportedProvider { .. } | Self::GenerationFailed { .. } => {
                ErrorCategory::Generation
            }
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// Only the fetch stage retries, and never for local URL validation.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => !e.is_local(),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status_code(),
            Self::GenerationFailed { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DocError>;
