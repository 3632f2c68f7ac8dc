//! Reference [`RouteBuilder`] implementation for axum.
//!
//! ## Examples
//!
//! ```
//! use conduit::{HandlerError, RouteBuilder};
//! use conduit::axum_adapter::mount;
//!
//! let router: axum::Router = mount(axum::Router::new(), |routes| {
//!     routes.register_get("/health", || async { Ok::<_, HandlerError>("ok") });
//! });
//! # let _ = router;
//! ```

use std::future::Future;
use std::sync::Arc;

use ::axum::Router;
use ::axum::body::Bytes;
use ::axum::extract::{RawPathParams, RawQuery};
use ::axum::http::StatusCode;
use ::axum::http::header::CONTENT_TYPE;
use ::axum::response::{IntoResponse, Response};
use ::axum::routing::{MethodRouter, get, post};
use conduit_define::path::to_native_pattern;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::adapter::{JSON_CONTENT_TYPE, RouteBuilder, decode_body, encode_output};
use crate::envelope::ParamsEnvelope;
use crate::error::{DispatchError, HandlerError};

/// Collects conduit routes into an axum [`Router`].
#[derive(Debug)]
pub struct AxumRouteBuilder<S = ()> {
    router: Router<S>,
}

impl<S> Default for AxumRouteBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AxumRouteBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Starts from an existing router; its routes are kept.
    pub fn from_router(router: Router<S>) -> Self {
        Self { router }
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }

    fn add(&mut self, path: &str, method_router: MethodRouter<S>) {
        let pattern = to_native_pattern(path);
        debug!(path, %pattern, "registering route");
        let router = std::mem::replace(&mut self.router, Router::new());
        self.router = router.route(&pattern, method_router);
    }
}

/// Registers routes into `router` and returns it.
pub fn mount<S, F>(router: Router<S>, register: F) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(&mut AxumRouteBuilder<S>),
{
    let mut builder = AxumRouteBuilder::from_router(router);
    register(&mut builder);
    builder.into_router()
}

impl<S> RouteBuilder for AxumRouteBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn register_get<O, F, Fut>(&mut self, path: &str, handler: F)
    where
        O: Serialize + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let route: Arc<str> = Arc::from(path);
        self.add(
            path,
            get(move || {
                let handler = Arc::clone(&handler);
                let route = Arc::clone(&route);
                async move { respond(&route, handler().await.map_err(DispatchError::from)) }
            }),
        );
    }

    fn register_get_with_params<P, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        P: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let route: Arc<str> = Arc::from(path);
        self.add(
            path,
            get(move |captures: RawPathParams, RawQuery(query): RawQuery| {
                let handler = Arc::clone(&handler);
                let route = Arc::clone(&route);
                async move {
                    let decoded = envelope(&captures, query.as_deref()).decode::<P>();
                    let result = match decoded {
                        Ok(params) => handler(params).await.map_err(DispatchError::from),
                        Err(err) => Err(err),
                    };
                    respond(&route, result)
                }
            }),
        );
    }

    fn register_post<B, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        B: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(B) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let route: Arc<str> = Arc::from(path);
        self.add(
            path,
            post(move |payload: Bytes| {
                let handler = Arc::clone(&handler);
                let route = Arc::clone(&route);
                async move {
                    let decoded = decode_body::<B>(&payload);
                    let result = match decoded {
                        Ok(body) => handler(body).await.map_err(DispatchError::from),
                        Err(err) => Err(err),
                    };
                    respond(&route, result)
                }
            }),
        );
    }

    fn register_post_with_params<P, B, O, F, Fut>(&mut self, path: &str, handler: F)
    where
        P: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(P, B) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let route: Arc<str> = Arc::from(path);
        self.add(
            path,
            post(
                move |captures: RawPathParams, RawQuery(query): RawQuery, payload: Bytes| {
                    let handler = Arc::clone(&handler);
                    let route = Arc::clone(&route);
                    async move {
                        let decoded = envelope(&captures, query.as_deref())
                            .decode::<P>()
                            .and_then(|params| Ok((params, decode_body::<B>(&payload)?)));
                        let result = match decoded {
                            Ok((params, body)) => {
                                handler(params, body).await.map_err(DispatchError::from)
                            }
                            Err(err) => Err(err),
                        };
                        respond(&route, result)
                    }
                },
            ),
        );
    }
}

fn envelope(captures: &RawPathParams, query: Option<&str>) -> ParamsEnvelope {
    ParamsEnvelope::from_parts(captures.iter(), ParamsEnvelope::parse_query(query))
}

/// Writes a handler result as an HTTP response.
fn respond<O: Serialize + 'static>(route: &str, result: Result<O, DispatchError>) -> Response {
    match result.and_then(|output| encode_output(&output)) {
        Ok(None) => StatusCode::OK.into_response(),
        Ok(Some(json)) => (StatusCode::OK, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response(),
        Err(err) => error_response(route, &err),
    }
}

fn error_response(route: &str, err: &DispatchError) -> Response {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(route, status = status.as_u16(), error = %err, "handler failed");
    } else {
        debug!(route, status = status.as_u16(), error = %err, "request rejected");
    }
    match serde_json::to_vec(&err.body()) {
        Ok(json) => (status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response(),
        Err(_) => status.into_response(),
    }
}
