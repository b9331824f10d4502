//! Specification retrieval.
//!
//! `SpecFetcher` downloads raw specification text over HTTP with optional URL
//! validation, a read timeout, bounded retries with exponential backoff, a
//! response size ceiling, and an optional URL-keyed cache.

pub mod cache;

pub use cache::SpecCache;

use std::sync::Arc;

use futures::StreamExt;
use reqwest::header::ACCEPT;
use url::Url;

use crate::config::FetchProperties;
use crate::defaults;
use crate::error::{DocError, FetchError};
use crate::retry::{RetryExecutor, RetryFailure, RetryPolicy};

/// Validate a specification URL before any network traffic.
///
/// The URL must parse, be absolute, and use exactly `http` or `https`
/// (lowercase, as written by the caller).
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(invalid("URL must be absolute".to_string()));
        }
        Err(e) => return Err(invalid(format!("malformed URL ({e})"))),
    };

    // `Url::parse` lowercases the scheme, so compare against the raw input.
    let raw_scheme = url
        .trim()
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .unwrap_or_default();
    if raw_scheme != "http" && raw_scheme != "https" {
        return Err(invalid("URL must use http or https protocol".to_string()));
    }

    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(invalid("URL must be absolute".to_string()));
    }

    Ok(parsed)
}

/// Fetches raw specification text
#[derive(Clone)]
pub struct SpecFetcher {
    http_client: reqwest::Client,
    properties: FetchProperties,
    cache: Option<Arc<SpecCache>>,
    max_body_bytes: usize,
}

impl SpecFetcher {
    /// Create a fetcher with its own HTTP client and, if enabled, its own cache
    pub fn new(properties: FetchProperties) -> Result<Self, DocError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(properties.connect_timeout)
            .user_agent(defaults::fetch::USER_AGENT)
            .build()
            .map_err(|e| DocError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(http_client, properties))
    }

    /// Create a fetcher on top of a caller-supplied HTTP client
    pub fn with_http_client(http_client: reqwest::Client, properties: FetchProperties) -> Self {
        let cache = SpecCache::from_properties(&properties).map(Arc::new);
        Self {
            http_client,
            properties,
            cache,
            max_body_bytes: defaults::fetch::MAX_SPEC_BYTES,
        }
    }

    /// Share an existing cache (e.g. one process-wide instance)
    pub fn with_cache(mut self, cache: Arc<SpecCache>) -> Self {
        if self.properties.cache_enabled() {
            self.cache = Some(cache);
        }
        self
    }

    /// Override the response size ceiling
    pub const fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn properties(&self) -> &FetchProperties {
        &self.properties
    }

    pub fn cache(&self) -> Option<&Arc<SpecCache>> {
        self.cache.as_ref()
    }

    /// Fetch the specification at `url`.
    ///
    /// Cached entries bypass the network and the retry loop. Remote failures
    /// are retried up to `max_retries` times; invalid URLs never are.
    pub async fn fetch(&self, url: &str) -> Result<String, DocError> {
        tracing::info!("Fetching OpenAPI specification from: {}", url);

        if self.properties.validate_url
            && let Err(e) = validate_url(url)
        {
            tracing::error!(error = %e, "Rejected OpenAPI specification URL");
            return Err(e.into());
        }

        if let Some(cache) = &self.cache
            && let Some(body) = cache.get(url).await
        {
            tracing::debug!(url, "Serving OpenAPI specification from cache");
            return Ok(body);
        }

        let executor = RetryExecutor::new(RetryPolicy::from_fetch_properties(&self.properties));
        match executor.execute(|| self.fetch_once(url)).await {
            Ok(body) => {
                tracing::debug!(
                    "Successfully fetched OpenAPI specification ({} characters)",
                    body.chars().count()
                );
                if let Some(cache) = &self.cache {
                    cache.insert(url, body.clone()).await;
                }
                Ok(body)
            }
            Err(RetryFailure { error, attempts }) => {
                let error = if error.is_local() {
                    error
                } else {
                    FetchError::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                        source: Box::new(error),
                    }
                };
                tracing::error!(error = %error, attempts, "Failed to fetch OpenAPI specification");
                Err(error.into())
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, defaults::fetch::ACCEPT)
            .timeout(self.properties.read_timeout)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let error = FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            };
            tracing::error!("{}", error);
            return Err(error);
        }

        if let Some(length) = response.content_length()
            && length > self.max_body_bytes as u64
        {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_body_bytes,
            });
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| FetchError::transport(url, &e))?;
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: format!("response is not valid UTF-8: {e}"),
        })
    }
}

impl std::fmt::Debug for SpecFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecFetcher")
            .field("properties", &self.properties)
            .field("cache", &self.cache.is_some())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
