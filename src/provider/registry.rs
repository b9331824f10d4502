//! Provider registry.
//!
//! A flat list resolved by predicate: registrations are not checked for
//! duplicates and lookup returns the first provider, in registration order,
//! that supports the requested name.

use std::sync::Arc;

use super::CompletionProvider;
use crate::config::DocsConfig;
use crate::error::DocError;
use crate::providers::{OllamaProvider, OpenAiProvider};

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the backends described by `config`.
    ///
    /// Ollama is always registered. The hosted backend is registered only when
    /// configured and an API key is available (set explicitly or via
    /// `OPENAI_API_KEY`).
    pub fn from_config(config: &DocsConfig) -> Result<Self, DocError> {
        let mut registry = Self::new();
        registry.register(Arc::new(OllamaProvider::new(config.ollama.clone())?));

        if let Some(openai) = &config.openai {
            let openai = openai.clone().with_env_api_key();
            if openai.api_key.is_some() {
                registry.register(Arc::new(OpenAiProvider::new(openai)?));
            } else {
                tracing::warn!(
                    provider = %openai.name,
                    "Skipping provider registration: no API key configured"
                );
            }
        }

        Ok(registry)
    }

    pub fn register(&mut self, provider: Arc<dyn CompletionProvider>) {
        tracing::debug!(provider = provider.provider_name(), "Registered completion provider");
        self.providers.push(provider);
    }

    pub fn with_provider<P: CompletionProvider + 'static>(mut self, provider: P) -> Self {
        self.register(Arc::new(provider));
        self
    }

    /// Resolve the first provider supporting `name`.
    pub fn get_client(&self, name: &str) -> Result<Arc<dyn CompletionProvider>, DocError> {
        self.providers
            .iter()
            .find(|provider| provider.supports(name))
            .cloned()
            .ok_or_else(|| {
                let error = DocError::unsupported_provider(name, self.list_providers());
                tracing::error!(error = %error, "No completion provider matched");
                error
            })
    }

    /// Registered names, in registration order
    pub fn list_providers(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|provider| provider.provider_name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list_providers())
            .finish()
    }
}
