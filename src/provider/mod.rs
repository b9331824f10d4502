//! Completion provider capability.
//!
//! A provider turns a prompt into a streamed completion. Backends live in
//! [`crate::providers`]; [`ProviderRegistry`] resolves them by name.

pub mod registry;

pub use registry::ProviderRegistry;

use async_trait::async_trait;

use crate::error::DocError;
use crate::streaming::ChunkStream;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Identifier callers select this backend by
    fn provider_name(&self) -> &str;

    /// Case-insensitive match against [`provider_name`](Self::provider_name)
    fn supports(&self, name: &str) -> bool {
        self.provider_name().eq_ignore_ascii_case(name)
    }

    /// Stream a completion for `prompt`.
    ///
    /// Fragments are yielded as the backend produces them. The stream ends
    /// when the backend signals completion and yields an error if the call
    /// fails mid-stream. Failures before streaming starts are returned
    /// directly.
    async fn complete(&self, prompt: &str) -> Result<ChunkStream, DocError>;
}
