//! # Inkify - API documentation from OpenAPI specifications
//!
//! Inkify fetches an OpenAPI v3 or Swagger v2 specification, normalizes it,
//! renders a documentation prompt and streams Markdown back from a pluggable
//! language-model backend.
//!
#![deny(unsafe_code)]

//! ## Pipeline
//!
//! - **Fetch**: [`fetch::SpecFetcher`] downloads the raw specification with URL
//!   validation, a read timeout, bounded retries and an optional TTL cache.
//! - **Parse**: [`spec::SpecParser`] reads JSON or YAML, trying OpenAPI v3
//!   before Swagger v2, into a [`spec::NormalizedSpec`].
//! - **Prompt**: [`prompt::PromptBuilder`] summarizes endpoints and models
//!   into a fixed instruction template.
//! - **Complete**: a [`provider::CompletionProvider`] resolved by name from the
//!   [`provider::ProviderRegistry`] streams the result.
//!
//! [`orchestrator::DocumentationOrchestrator`] runs the stages in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use inkify::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _guard = inkify::telemetry::init_from_env()?;
//!     let orchestrator = DocumentationOrchestrator::from_config(&DocsConfig::default())?;
//!
//!     let mut stream = orchestrator
//!         .generate("https://petstore3.swagger.io/api/v3/openapi.json", "ollama")
//!         .await?;
//!     while let Some(chunk) = stream.next().await {
//!         print!("{}", chunk?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod retry;
pub mod spec;
pub mod streaming;
pub mod telemetry;

pub use error::{DocError, FetchError};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{DocsConfig, FetchProperties, OllamaConfig, OpenAiConfig};
    pub use crate::error::{DocError, ErrorCategory, FetchError, user_message};
    pub use crate::fetch::{SpecCache, SpecFetcher};
    pub use crate::orchestrator::DocumentationOrchestrator;
    pub use crate::prompt::PromptBuilder;
    pub use crate::provider::{CompletionProvider, ProviderRegistry};
    pub use crate::providers::{OllamaProvider, OpenAiProvider};
    pub use crate::spec::{NormalizedSpec, PathEntry, SchemaEntry, SpecParser, SpecVersion};
    pub use crate::streaming::{CancelHandle, ChunkStream, ChunkStreamHandle};
}
