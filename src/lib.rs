//! CMS Core - account, permission group and access level service
//!
//! Accounts and groups are held as two aggregates in a pluggable store.
//! Every mutation is serialized per aggregate and persisted before the
//! result is returned.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod server;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
