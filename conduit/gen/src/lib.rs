//! Conduit code generator library.
//!
//! This crate turns RPC service definitions parsed by `conduit-define` into
//! Rust source. For each service the generated module contains:
//!
//! - A path builder per route with named path parameters
//! - A params struct per route with named parameters
//! - The service trait a server implements
//! - A typed client with one async method per route
//! - `register_routes`, which wires an implementation into any
//!   `conduit::RouteBuilder`
//!
//! ## Modules
//!
//! - [`codegen`] - Code generation for the individual items
//! - [`output`] - Final assembly, validation, and file writing
//! - [`validation`] - Checks run before any code is emitted
//! - [`naming`] - Case conversion for generated identifiers
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use conduit_gen::output::{generate_and_write, load_service};
//!
//! let service = load_service("api/todo.toml").unwrap();
//! let code = generate_and_write(&service, Path::new("src/generated"), true).unwrap();
//! println!("{}", code);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a service named `TodoApi` with a route `get_todo` at `/todos/:id`:
//!
//! ```text
//! pub struct GetTodoPath { pub id: String }
//! pub struct GetTodoParams { pub id: String }
//!
//! pub trait TodoApi: Send + Sync + 'static {
//!     fn get_todo(&self, id: String) -> impl Future<Output = Result<Todo, HandlerError>> + Send;
//! }
//!
//! pub struct TodoApiClient { http: conduit::HttpClient }
//!
//! impl TodoApiClient {
//!     pub async fn get_todo(&self, id: &str, config: Option<&ClientConfig>) -> Result<Todo, ClientError>;
//! }
//!
//! pub fn register_routes<S, B>(service: Arc<S>, builder: &mut B) where S: TodoApi, B: RouteBuilder;
//! ```

pub mod codegen;
pub mod errors;
pub mod naming;
pub mod output;
pub mod validation;

#[cfg(test)]
mod test_utils;
