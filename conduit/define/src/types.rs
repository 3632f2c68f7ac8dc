//! Core types for RPC route definitions.
//!
//! This module provides the structured form that every declared method is
//! parsed into:
//!
//! - [`HttpMethod`] - The verbs a route may use
//! - [`RouteParameter`] - A named, string-valued parameter
//! - [`RouteMeta`] - One fully categorized route
//! - [`ServiceDefinition`] - The ordered set of routes making up one service
//!
//! Values of these types are produced once by the parser and treated as
//! immutable afterwards. Both the client and the server bindings are
//! emitted from the same [`ServiceDefinition`], which is what keeps the two
//! sides in agreement about path shape and parameter classification.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// HTTP verbs supported by RPC routes.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use conduit_define::HttpMethod;
///
/// let method = HttpMethod::from_str("GET").unwrap();
/// assert_eq!(method, HttpMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use conduit_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Post.to_string(), "POST");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET - read-only call, never carries a payload
    Get,
    /// HTTP POST - call that may carry a JSON payload
    Post,
}

/// A named, string-valued route parameter.
///
/// Whether a parameter travels in the path or in the query string is not
/// stored here; it follows from which list of [`RouteMeta`] holds it.
///
/// ## Examples
///
/// ```
/// use conduit_define::RouteParameter;
///
/// let id = RouteParameter::required("id");
/// let filter = RouteParameter::optional("completed");
///
/// assert!(!id.is_optional);
/// assert!(filter.is_optional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteParameter {
    /// Parameter name, also the query key or placeholder name on the wire.
    pub name: String,
    /// Whether the value may be absent (`Option<String>`).
    pub is_optional: bool,
}

impl RouteParameter {
    /// Creates a parameter that must always be supplied.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
        }
    }

    /// Creates a parameter that may be absent.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: true,
        }
    }
}

/// A single parsed and categorized route.
///
/// ## Invariants
///
/// - The `:name` placeholders in `path` are exactly the names in
///   `path_parameters`, in template order.
/// - `body_type` is only ever set on [`HttpMethod::Post`] routes.
/// - `response_type` is `None` for routes that return no content.
///
/// ## Examples
///
/// ```
/// use conduit_define::{HttpMethod, RouteMeta, RouteParameter};
///
/// let route = RouteMeta {
///     name: "get_todo".to_string(),
///     path: "/todos/:id".to_string(),
///     method: HttpMethod::Get,
///     path_parameters: vec![RouteParameter::required("id")],
///     query_parameters: vec![],
///     body_type: None,
///     response_type: Some("Todo".to_string()),
///     description: None,
/// };
///
/// assert!(route.has_named_parameters());
/// assert!(!route.has_body());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    /// Method name, used for the client call and the service trait method.
    pub name: String,
    /// Path template with `:name` placeholders (e.g. `/todos/:id`).
    pub path: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Parameters substituted into the path, in template order.
    pub path_parameters: Vec<RouteParameter>,
    /// Parameters carried in the query string, in declaration order.
    pub query_parameters: Vec<RouteParameter>,
    /// Payload type name, verbatim as declared.
    pub body_type: Option<String>,
    /// Response type name, verbatim as declared. `None` means no content.
    pub response_type: Option<String>,
    /// Human-readable description carried into generated docs.
    pub description: Option<String>,
}

impl RouteMeta {
    /// Returns path parameters followed by query parameters.
    ///
    /// This is the field order of the generated params struct and the
    /// argument order (before `body`) of the generated service method.
    pub fn named_parameters(&self) -> impl Iterator<Item = &RouteParameter> {
        self.path_parameters
            .iter()
            .chain(self.query_parameters.iter())
    }

    /// Returns true if the route has any path or query parameter.
    pub fn has_named_parameters(&self) -> bool {
        !self.path_parameters.is_empty() || !self.query_parameters.is_empty()
    }

    /// Returns true if the route carries a typed payload.
    pub fn has_body(&self) -> bool {
        self.body_type.is_some()
    }

    /// Returns true if the route returns no content.
    pub fn is_no_content(&self) -> bool {
        self.response_type.is_none()
    }
}

/// A named, ordered collection of routes.
///
/// Route names are unique within a service; the parser enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    /// Service name (PascalCase), e.g. `TodoApi`.
    ///
    /// Becomes the generated trait name and the prefix of the client type.
    pub name: String,
    /// Human-readable description of the service.
    pub description: Option<String>,
    /// `use` trees emitted at the top of generated code.
    pub imports: Vec<String>,
    /// All routes, in declaration order.
    pub routes: Vec<RouteMeta>,
}

impl ServiceDefinition {
    /// Looks up a route by name.
    pub fn route(&self, name: &str) -> Option<&RouteMeta> {
        self.routes.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn http_method_display_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn http_method_static_str_matches_display() {
        for method in HttpMethod::iter() {
            let verb: &'static str = method.into();
            assert_eq!(verb, method.to_string());
        }
    }

    #[test]
    fn http_method_from_str_is_case_sensitive() {
        assert_eq!(HttpMethod::from_str("POST").unwrap(), HttpMethod::Post);
        assert!(HttpMethod::from_str("post").is_err());
        assert!(HttpMethod::from_str("PUT").is_err());
        assert!(HttpMethod::from_str("").is_err());
    }

    #[test]
    fn http_method_iter_has_two_verbs() {
        assert_eq!(HttpMethod::iter().count(), 2);
    }

    #[test]
    fn http_method_serde_uses_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Get).unwrap();
        assert_eq!(json, "\"GET\"");
        let back: HttpMethod = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(back, HttpMethod::Post);
    }

    #[test]
    fn named_parameters_lists_path_before_query() {
        let route = RouteMeta {
            name: "complete".to_string(),
            path: "/todos/:id/complete".to_string(),
            method: HttpMethod::Post,
            path_parameters: vec![RouteParameter::required("id")],
            query_parameters: vec![RouteParameter::optional("note")],
            body_type: Some("UpdateTodoRequest".to_string()),
            response_type: None,
            description: None,
        };

        let names: Vec<_> = route.named_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "note"]);
        assert!(route.has_body());
        assert!(route.is_no_content());
    }
}
