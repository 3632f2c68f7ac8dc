//! Todo list service built from `api/todo.toml`.
//!
//! The build script generates the [`api`] module: the `TodoApi` trait, the
//! `TodoApiClient`, and `register_routes`. [`service::TodoService`]
//! implements the trait over an in-memory [`store::TodoStore`], and [`app`]
//! mounts it on an axum router.

use std::sync::Arc;

pub mod models;
pub mod service;
pub mod store;

/// Code generated from `api/todo.toml`.
pub mod api {
    include!(concat!(env!("OUT_DIR"), "/todo_api.rs"));
}

/// Builds the axum router serving `service`.
pub fn app(service: Arc<service::TodoService>) -> axum::Router {
    conduit::mount(axum::Router::new(), |builder| {
        api::register_routes(service, builder)
    })
}
