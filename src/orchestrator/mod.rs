//! Documentation pipeline orchestrator.
//!
//! Runs fetch → parse → prompt → provider resolution in order, short-circuiting
//! on the first failure, then hands back the provider's completion as a
//! [`ChunkStream`]. Errors from each stage pass through unchanged.
//!
//! The first fragment is awaited before returning so that a backend which
//! finishes without output surfaces as [`DocError::GenerationFailed`] instead
//! of an empty success.

use std::sync::Arc;

use futures::StreamExt;

use crate::config::DocsConfig;
use crate::defaults;
use crate::error::DocError;
use crate::fetch::SpecFetcher;
use crate::prompt::PromptBuilder;
use crate::provider::ProviderRegistry;
use crate::spec::SpecParser;
use crate::streaming::{
    CancelHandle, ChunkStream, ChunkStreamHandle, make_cancellable_stream_handle_from_future,
    spawn_chunk_channel,
};

/// Composes the pipeline stages. Cheap to clone; clones share the spec cache
/// and the provider registry.
#[derive(Clone)]
pub struct DocumentationOrchestrator {
    fetcher: SpecFetcher,
    parser: SpecParser,
    prompt_builder: PromptBuilder,
    registry: Arc<ProviderRegistry>,
    default_provider: String,
    channel_capacity: usize,
}

impl DocumentationOrchestrator {
    pub fn new(fetcher: SpecFetcher, registry: ProviderRegistry) -> Self {
        Self {
            fetcher,
            parser: SpecParser::new(),
            prompt_builder: PromptBuilder::new(),
            registry: Arc::new(registry),
            default_provider: defaults::providers::DEFAULT_PROVIDER.to_string(),
            channel_capacity: defaults::streaming::CHANNEL_CAPACITY,
        }
    }

    /// Wire the default fetcher and providers from `config`
    pub fn from_config(config: &DocsConfig) -> Result<Self, DocError> {
        let fetcher = SpecFetcher::new(config.fetch.clone())?;
        let registry = ProviderRegistry::from_config(config)?;
        Ok(Self::new(fetcher, registry).with_default_provider(config.default_provider.clone()))
    }

    pub fn with_default_provider<S: Into<String>>(mut self, provider: S) -> Self {
        self.default_provider = provider.into();
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    pub fn fetcher(&self) -> &SpecFetcher {
        &self.fetcher
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Provider names a caller can choose from, in registration order
    pub fn providers(&self) -> Vec<String> {
        self.registry.list_providers()
    }

    /// Generate documentation for the spec at `url` with `provider`.
    ///
    /// Dropping the returned stream stops the backend and releases its
    /// connection.
    pub async fn generate(&self, url: &str, provider: &str) -> Result<ChunkStream, DocError> {
        let raw = self.fetcher.fetch(url).await?;
        let spec = self.parser.parse(&raw)?;
        let prompt = self.prompt_builder.build_prompt(&spec);
        let client = self.registry.get_client(provider)?;

        tracing::info!(
            "Generating documentation for '{}' ({}) with {}",
            spec.title(),
            spec.version().label(),
            client.provider_name()
        );

        let stream = client.complete(&prompt).await?;
        let mut stream = spawn_chunk_channel(stream, self.channel_capacity, &CancelHandle::new());

        let first = loop {
            match stream.next().await {
                Some(Ok(chunk)) if chunk.is_empty() => continue,
                Some(Ok(chunk)) => break chunk,
                Some(Err(e)) => return Err(e),
                None => {
                    let error = DocError::generation_failed(
                        client.provider_name(),
                        "the model returned no content",
                    );
                    tracing::error!(error = %error, "Empty generation");
                    return Err(error);
                }
            }
        };
        tracing::debug!("Received first documentation chunk");

        Ok(Box::pin(
            futures::stream::once(async move { Ok(first) }).chain(stream),
        ))
    }

    /// [`generate`](Self::generate) with the configured default provider
    pub async fn generate_default(&self, url: &str) -> Result<ChunkStream, DocError> {
        self.generate(url, &self.default_provider).await
    }

    /// Like [`generate`](Self::generate), but returns at once with a handle.
    ///
    /// Cancelling aborts whichever stage is in flight, including the fetch.
    /// Pipeline errors arrive as the single item of the stream, and so does
    /// [`DocError::Cancelled`] when the cancel lands before streaming starts.
    pub fn generate_with_cancel(&self, url: &str, provider: &str) -> ChunkStreamHandle {
        let this = self.clone();
        let url = url.to_string();
        let provider = provider.to_string();
        make_cancellable_stream_handle_from_future(async move {
            this.generate(&url, &provider).await
        })
    }

    /// Run the pipeline and concatenate every fragment in order
    pub async fn generate_to_string(&self, url: &str, provider: &str) -> Result<String, DocError> {
        let mut stream = self.generate(url, provider).await?;
        let mut document = String::new();
        while let Some(chunk) = stream.next().await {
            document.push_str(&chunk?);
        }
        Ok(document)
    }
}

impl std::fmt::Debug for DocumentationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentationOrchestrator")
            .field("fetcher", &self.fetcher)
            .field("registry", &self.registry)
            .field("default_provider", &self.default_provider)
            .finish()
    }
}
