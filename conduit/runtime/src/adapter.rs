//! The router-independent registration contract.
//!
//! Generated server glue only ever talks to a [`RouteBuilder`]. A concrete
//! router is bound by implementing the trait once; the decode and encode
//! steps every implementation shares are provided here as free functions.
//!
//! | Named params | Body | Registration |
//! |--------------|------|--------------|
//! | no | no | [`RouteBuilder::register_get`] |
//! | yes | no | [`RouteBuilder::register_get_with_params`] |
//! | no | yes | [`RouteBuilder::register_post`] |
//! | yes | yes | [`RouteBuilder::register_post_with_params`] |
//!
//! POST routes without a payload use the body shapes with [`NoBody`].

use std::any::TypeId;
use std::future::Future;

use serde::de::{Deserialize, DeserializeOwned, Deserializer, IgnoredAny};
use serde::Serialize;

use crate::error::{DispatchError, HandlerError};

/// Content type of every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Registers typed handlers against a router.
///
/// Paths use the `:name` placeholder syntax; implementations translate it
/// to their router's native pattern. Registration happens before the router
/// starts serving and is not expected afterwards.
pub trait RouteBuilder {
    /// Registers a GET route without parameters.
    fn register_get<O, F, Fut>(&mut self, path: &str, handler: F)
    where
        O: Serialize + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static;

    /// Registers a GET route whose path and query values decode into `P`.
    fn register_get_with_params<P, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        P: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static;

    /// Registers a POST route whose payload decodes into `B`.
    fn register_post<B, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        B: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(B) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static;

    /// Registers a POST route with both parameters and a payload.
    fn register_post_with_params<P, B, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        P: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(P, B) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static;
}

/// Body marker for POST routes that declare no payload.
///
/// Decodes from anything, including an empty request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBody;

impl<'de> Deserialize<'de> for NoBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoBody)
    }
}

/// Returns true if `O` is the "no content" output type `()`.
pub fn is_no_content<O: 'static>() -> bool {
    TypeId::of::<O>() == TypeId::of::<()>()
}

/// Decodes a request payload.
///
/// An empty or all-whitespace payload decodes as JSON `null`, which only
/// [`NoBody`] and `Option` types accept.
///
/// ## Errors
///
/// Returns [`DispatchError::BadRequest`] if the payload does not decode.
pub fn decode_body<B: DeserializeOwned>(payload: &[u8]) -> Result<B, DispatchError> {
    let payload = if payload.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        payload
    };
    serde_json::from_slice(payload)
        .map_err(|e| DispatchError::BadRequest(format!("Invalid request body: {e}")))
}

/// Encodes a handler output.
///
/// Returns `None` for no-content routes, which answer with an empty body.
///
/// ## Errors
///
/// Returns [`DispatchError::Encode`] if serialization fails.
pub fn encode_output<O: Serialize + 'static>(output: &O) -> Result<Option<Vec<u8>>, DispatchError> {
    if is_no_content::<O>() {
        return Ok(None);
    }
    serde_json::to_vec(output)
        .map(Some)
        .map_err(DispatchError::Encode)
}
