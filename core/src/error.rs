//! Error types for the directory client.
//!
//! # Design
//! Every remote operation fails with one type, `RequestFailed`, which names
//! the operation and wraps a `Failure` describing what went wrong. Callers
//! that only care "did it work" match on the outer type; callers that want
//! the status or the underlying cause reach through `status()` or
//! `std::error::Error::source`.

use thiserror::Error;

use crate::types::Operation;

/// The single error kind returned by `RemoteDirectoryClient` operations.
#[derive(Debug, Error)]
#[error("{operation} request failed: {failure}")]
pub struct RequestFailed {
    pub operation: Operation,
    #[source]
    pub failure: Failure,
}

impl RequestFailed {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match &self.failure {
            Failure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What went wrong inside a single request/response exchange.
#[derive(Debug, Error)]
pub enum Failure {
    /// The server answered with a non-2xx status. `content_type` is the
    /// response's `Content-Type` header, when it sent one.
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    /// No response was obtained. The cause is the `source()`.
    #[error("transport error")]
    Transport(#[from] TransportError),

    /// The response body was not valid JSON.
    #[error("deserialization failed")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed")]
    Serialization(#[source] serde_json::Error),
}

/// Network-level failure reported by a `Transport`.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(cause.into())
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// Errors raised while resolving `ClientConfig` or building a transport.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value {value:?} for {var}: expected a positive number of seconds")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}
