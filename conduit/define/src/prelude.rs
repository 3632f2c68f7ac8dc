//! Convenient re-exports for declaring services.
//!
//! ```
//! use conduit_define::prelude::*;
//!
//! let service = parse_service(
//!     &ServiceDecl::new("Health").method(MethodDecl::get("ping", "/ping").returns("()")),
//! )
//! .unwrap();
//!
//! assert_eq!(service.routes[0].method, HttpMethod::Get);
//! ```

pub use crate::decl::{MethodDecl, ParamDecl, PathArg, ServiceDecl};
pub use crate::errors::{ParseError, SchemaError};
pub use crate::parser::{parse_route, parse_service};
pub use crate::schema::load_service_file;
pub use crate::types::{HttpMethod, RouteMeta, RouteParameter, ServiceDefinition};
