//! Async client for a remote geographic directory and user service.
//!
//! # Overview
//! `RemoteDirectoryClient` wraps five endpoints (countries, departments,
//! provinces, districts, user creation) behind async methods that return
//! the server's JSON unchanged or a single `RequestFailed` error.
//!
//! # Design
//! - The client is stateless: a base address plus a `Transport`.
//! - Request building and response parsing are pure functions; only
//!   `Transport::execute` does I/O, so tests swap it for a stub.
//! - Failures are logged once through `tracing` and then returned.
//! - Configuration is an explicit `ClientConfig`, optionally resolved from
//!   the environment by the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{parse_response, RemoteDirectoryClient};
pub use config::ClientConfig;
pub use error::{ConfigError, Failure, RequestFailed, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{DistrictsQuery, EntityId, Operation, ProvincesQuery};
