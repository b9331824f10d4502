//! OpenAI (and OpenAI-compatible) completion backend.
//!
//! Streams `POST {base_url}/chat/completions` with the prompt as a single user
//! message.

mod streaming;
pub mod types;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::OpenAiConfig;
use crate::defaults;
use crate::error::DocError;
use crate::provider::CompletionProvider;
use crate::streaming::ChunkStream;
use types::{ChatCompletionRequest, ChatMessage};

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: reqwest::Client,
    config: OpenAiConfig,
    api_key: SecretString,
}

impl OpenAiProvider {
    /// Fails with a configuration error when no API key is set
    pub fn new(config: OpenAiConfig) -> Result<Self, DocError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(defaults::providers::CONNECT_TIMEOUT)
            .user_agent(defaults::fetch::USER_AGENT)
            .build()
            .map_err(|e| DocError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Self::with_http_client(http_client, config)
    }

    pub fn with_http_client(
        http_client: reqwest::Client,
        config: OpenAiConfig,
    ) -> Result<Self, DocError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            DocError::Configuration(format!(
                "No API key configured for provider '{}' (set {})",
                config.name,
                defaults::providers::openai::API_KEY_ENV
            ))
        })?;
        Ok(Self {
            http_client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, prompt: &str) -> Result<ChunkStream, DocError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
            temperature: self.config.temperature,
        };

        tracing::debug!(provider = %self.config.name, model = %self.config.model, "Starting chat completion");
        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error = DocError::generation_failed(
                    self.provider_name(),
                    format!("Failed to send request: {e}"),
                );
                tracing::error!(error = %error, "Chat completion request failed");
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let error = DocError::generation_http(self.provider_name(), status.as_u16(), body);
            tracing::error!(error = %error, "Chat completion request rejected");
            return Err(error);
        }

        Ok(streaming::chunk_stream(self.config.name.clone(), response))
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("name", &self.config.name)
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = OpenAiProvider::new(OpenAiConfig::default()).unwrap_err();
        assert!(matches!(err, DocError::Configuration(ref m) if m.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn renamed_provider_is_selected_by_its_name() {
        let provider =
            OpenAiProvider::new(OpenAiConfig::default().name("groq").api_key("gsk-test")).unwrap();
        assert!(provider.supports("GROQ"));
        assert!(!provider.supports("openai"));
    }
}
