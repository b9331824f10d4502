//! Retry module
//! - policy.rs: policy-based retries with exponential backoff and jitter

pub mod policy;

pub use policy::*;
