//! Default Configuration Values
//!
//! This module centralizes the default values used throughout inkify.
//! Having defaults in one place makes them easier to maintain, document, and adjust.

use std::time::Duration;

/// Specification fetch defaults
pub mod fetch {
    use super::*;

    /// Default timeout for establishing the connection to the spec host
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default timeout for reading the full specification body
    pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default number of retries after the first failed attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Default seed delay for exponential backoff between attempts
    pub const RETRY_DELAY: Duration = Duration::from_millis(500);

    /// Upper bound for a single backoff delay
    pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

    /// Default number of cached specifications (0 disables the cache)
    pub const CACHE_SIZE: usize = 100;

    /// Default lifetime of a cached specification
    pub const CACHE_TTL: Duration = Duration::from_secs(600);

    /// Largest specification body we are willing to buffer (16 MiB)
    pub const MAX_SPEC_BYTES: usize = 16 * 1024 * 1024;

    /// Content negotiation for specification downloads
    pub const ACCEPT: &str = "text/plain, application/json, application/yaml, */*;q=0.8";

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("inkify/", env!("CARGO_PKG_VERSION"));
}

/// Completion provider defaults
pub mod providers {
    use super::*;

    /// Provider used when the caller does not name one
    pub const DEFAULT_PROVIDER: &str = "ollama";

    /// Connect timeout for completion backends; reads are unbounded while streaming
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Ollama defaults
    pub mod ollama {
        pub const NAME: &str = "ollama";
        pub const BASE_URL: &str = "http://localhost:11434";
        pub const MODEL: &str = "llama3.2";
        pub const TEMPERATURE: f32 = 0.7;
    }

    /// OpenAI defaults
    pub mod openai {
        pub const NAME: &str = "openai";
        pub const BASE_URL: &str = "https://api.openai.com/v1";
        pub const MODEL: &str = "gpt-4o-mini";
        pub const TEMPERATURE: f32 = 0.7;
        pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
    }
}

/// Streaming defaults
pub mod streaming {
    /// Capacity of the chunk channel between a backend and its consumer
    pub const CHANNEL_CAPACITY: usize = 32;
}
