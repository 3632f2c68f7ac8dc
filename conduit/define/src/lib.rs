//! Conduit Definition Library
//!
//! This crate holds the build-time model of an RPC service: what the
//! service author declares, and the categorized routes the generator
//! emits code from. It is consumed by `conduit-gen`.
//!
//! ## Core Types
//!
//! ### Declarations (input)
//!
//! - [`ServiceDecl`] - A named service with its method declarations and imports
//! - [`MethodDecl`] - One method: verb, path argument, parameters, return type
//! - [`PathArg`] - A literal path template, or a computed one that is rejected
//! - [`ParamDecl`] - A parameter name with its type as written
//!
//! ### Route metadata (output)
//!
//! - [`ServiceDefinition`] - The ordered, validated routes of one service
//! - [`RouteMeta`] - A single route with path and query parameters separated
//! - [`RouteParameter`] - A string parameter, optionally absent
//! - [`HttpMethod`] - GET or POST
//!
//! ## Examples
//!
//! ```
//! use conduit_define::{MethodDecl, ServiceDecl, parse_service};
//!
//! let decl = ServiceDecl::new("TodoApi")
//!     .import("crate::models::Todo")
//!     .method(
//!         MethodDecl::get("get_todo", "/todos/:id")
//!             .param("id", "String")
//!             .returns("Todo"),
//!     );
//!
//! let service = parse_service(&decl).unwrap();
//! let route = service.route("get_todo").unwrap();
//!
//! assert_eq!(route.path_parameters[0].name, "id");
//! assert!(route.query_parameters.is_empty());
//! ```
//!
//! Service declarations usually live in TOML files; see [`schema`].

pub mod decl;
pub mod errors;
pub mod parser;
pub mod path;
pub mod prelude;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use decl::{MethodDecl, ParamDecl, PathArg, ServiceDecl};
pub use errors::{ParseError, SchemaError};
pub use parser::{BODY_PARAM, categorize, parse_route, parse_service};
pub use schema::load_service_file;
pub use types::{HttpMethod, RouteMeta, RouteParameter, ServiceDefinition};
