//! HTTP middleware
//!
//! - Caller identity extractor
//! - Request ID propagation and HTTP metrics
//! - Failure envelope for framework-level rejections

pub mod auth;
pub mod error_response;
pub mod metrics;

pub use auth::{CallerIdentity, ACCOUNT_HEADER};
pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
