//! Doctor App Session
//!
//! Token storage, unverified claims decoding and the facade over the remote service.

/// Client configuration
pub mod config;

/// Session token storage and claims
pub mod token;

/// API client / session facade
pub mod client;

pub use client::{ApiClient, BuildError, ScreenScope};
pub use config::ClientConfig;
pub use domain::{Error, ErrorKind};
