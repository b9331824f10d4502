//! Ollama completion backend.
//!
//! Streams `POST {base_url}/api/generate` and yields the `response` text of
//! each frame.

mod streaming;
pub mod types;

use async_trait::async_trait;

use crate::config::OllamaConfig;
use crate::defaults;
use crate::error::DocError;
use crate::provider::CompletionProvider;
use crate::streaming::ChunkStream;
use types::{GenerateOptions, GenerateRequest};

#[derive(Clone)]
pub struct OllamaProvider {
    http_client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self, DocError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(defaults::providers::CONNECT_TIMEOUT)
            .user_agent(defaults::fetch::USER_AGENT)
            .build()
            .map_err(|e| DocError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(http_client, config))
    }

    pub fn with_http_client(http_client: reqwest::Client, config: OllamaConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        defaults::providers::ollama::NAME
    }

    async fn complete(&self, prompt: &str) -> Result<ChunkStream, DocError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: true,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
            keep_alive: self.config.keep_alive.as_deref(),
        };

        tracing::debug!(model = %self.config.model, "Starting Ollama generation");
        let response = self
            .http_client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error = DocError::generation_failed(
                    self.provider_name(),
                    format!("Failed to send request: {e}"),
                );
                tracing::error!(error = %error, "Ollama request failed");
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let error = DocError::generation_http(self.provider_name(), status.as_u16(), body);
            tracing::error!(error = %error, "Ollama rejected the generation request");
            return Err(error);
        }

        Ok(streaming::chunk_stream(response))
    }
}

impl std::fmt::Debug for OllamaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaProvider")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}
