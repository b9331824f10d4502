//! User-facing error helpers.
//!
//! The web layer owns presentation, but every front end has to honor the same
//! mapping from error kind to message class. These helpers keep that mapping
//! in one place, library-first.

use super::types::{DocError, ErrorCategory};

/// Message shown when the specification could not be retrieved
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch the OpenAPI specification";

/// Prefix for failures the user can act on (bad spec, unknown provider)
pub const GENERATION_REJECTED_PREFIX: &str = "Could not generate documentation";

/// Message shown when the backend produced nothing usable
pub const GENERATION_FAILED_MESSAGE: &str =
    "Documentation generation failed. Please try again later.";

/// Message shown for anything unexpected
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Map an error to the message class a caller should display.
///
/// - fetch failures: "could not fetch the specification"
/// - illegal spec / unsupported provider: "could not generate documentation: <reason>"
/// - generation failures: generic failure message
/// - anything else: generic unexpected-error message
pub fn user_message(err: &DocError) -> String {
    match err {
        DocError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
        DocError::IllegalSpec { .. } | DocError::UnsupportedProvider { .. } => {
            format!("{GENERATION_REJECTED_PREFIX}: {err}")
        }
        DocError::GenerationFailed { .. } => GENERATION_FAILED_MESSAGE.to_string(),
        DocError::Configuration(_) | DocError::Cancelled => UNEXPECTED_MESSAGE.to_string(),
    }
}

/// Map an error to an HTTP status a web collaborator can reply with.
///
/// A URL rejected before any request is the caller's fault (400); a remote
/// failure that survived every retry is an upstream problem (502).
pub fn suggested_http_status(err: &DocError) -> u16 {
    match err.category() {
        ErrorCategory::Fetch if err.is_retryable() => 502,
        ErrorCategory::Fetch => 400,
        ErrorCategory::Spec => 422,
        ErrorCategory::Generation => match err {
            DocError::UnsupportedProvider { .. } => 400,
            _ => 503,
        },
        ErrorCategory::Configuration => 500,
        ErrorCategory::Cancelled => 499,
    }
}
