//! Error Handling Module
//!
//! This module provides error handling for the documentation pipeline, including:
//! - Core error types (`DocError`, `FetchError`, `ErrorCategory`)
//! - User-facing message mapping for the web boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use inkify::error::{DocError, ErrorCategory};
//!
//! let error = DocError::unsupported_provider("gemini", vec!["ollama".into()]);
//! assert_eq!(error.category(), ErrorCategory::Generation);
//! assert!(!error.is_retryable());
//! ```

pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
