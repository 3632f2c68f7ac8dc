//! Conduit runtime
//!
//! Code emitted by `conduit-gen` depends on this crate and nothing else from
//! the conduit family. It provides:
//!
//! - [`RouteBuilder`] - The four-shape registration contract server glue calls
//! - [`ParamsEnvelope`] - Merged path and query values for one request
//! - [`HttpClient`] and [`ClientConfig`] - Transport for generated clients
//! - [`HandlerError`], [`DispatchError`], [`ClientError`] - Runtime failures
//! - [`axum_adapter`] - The reference adapter (feature `axum`, on by default)

pub mod adapter;
#[cfg(feature = "axum")]
pub mod axum_adapter;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;

/// Path helpers used by generated path builders.
pub mod path {
    pub use conduit_define::path::{encode_segment, to_native_pattern};
}

pub use adapter::{NoBody, RouteBuilder};
#[cfg(feature = "axum")]
pub use axum_adapter::{AxumRouteBuilder, mount};
pub use client::{HttpClient, Reply};
pub use config::ClientConfig;
pub use conduit_define::HttpMethod;
pub use envelope::ParamsEnvelope;
pub use error::{ClientError, DispatchError, ErrorBody, HandlerError};

// Generated params structs derive through this path.
#[doc(hidden)]
pub use serde;
