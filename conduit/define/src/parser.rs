//! RouteSpec parser and path categorizer.
//!
//! Turns [`MethodDecl`]s into [`RouteMeta`] records. The rules are:
//!
//! - the verb must be `GET` or `POST`
//! - the path must be a literal template starting with `/`
//! - every `:name` segment of the template must match a declared parameter
//! - on POST, a parameter literally named `body` names the payload type
//! - every other parameter is `String` or `Option<String>`
//! - a parameter is a path parameter if its name is a placeholder, else a
//!   query parameter
//! - the return type is kept verbatim; `()` means the route returns no content
//! - no two routes of a service may be ambiguous to a router
//!
//! ## Examples
//!
//! ```
//! use conduit_define::{MethodDecl, parse_route};
//!
//! let route = parse_route(
//!     &MethodDecl::get("list_todos", "/todos")
//!         .param("completed", "Option<String>")
//!         .returns("Vec<Todo>"),
//! )
//! .unwrap();
//!
//! assert!(route.path_parameters.is_empty());
//! assert_eq!(route.query_parameters[0].name, "completed");
//! assert!(route.query_parameters[0].is_optional);
//! assert_eq!(route.response_type.as_deref(), Some("Vec<Todo>"));
//! ```

use std::collections::HashSet;
use std::str::FromStr;

use crate::decl::{MethodDecl, ParamDecl, PathArg, ServiceDecl};
use crate::errors::ParseError;
use crate::path::{extract_placeholders, is_placeholder_name, placeholder};
use crate::types::{HttpMethod, RouteMeta, RouteParameter, ServiceDefinition};

/// Name of the parameter that carries the payload on POST routes.
pub const BODY_PARAM: &str = "body";

/// Return type text meaning "no content".
const UNIT_TYPE: &str = "()";

/// Parses every method of a service.
///
/// Errors are wrapped in [`ParseError::InMethod`] so the caller can tell
/// which declaration failed.
///
/// ## Errors
///
/// Returns the first method-level error, or [`ParseError::DuplicateRoute`]
/// if two methods share a name.
pub fn parse_service(decl: &ServiceDecl) -> Result<ServiceDefinition, ParseError> {
    let mut seen = HashSet::new();
    let mut routes = Vec::with_capacity(decl.methods.len());

    for method in &decl.methods {
        if !seen.insert(method.name.as_str()) {
            return Err(ParseError::DuplicateRoute(method.name.clone()));
        }
        let route = parse_route(method).map_err(|e| ParseError::InMethod {
            method: method.name.clone(),
            source: Box::new(e),
        })?;
        routes.push(route);
    }

    for (index, route) in routes.iter().enumerate() {
        for other in &routes[..index] {
            if let Some(reason) = route_conflict(other, route) {
                return Err(ParseError::ConflictingRoute {
                    route: route.name.clone(),
                    other: other.name.clone(),
                    reason,
                });
            }
        }
    }

    Ok(ServiceDefinition {
        name: decl.name.clone(),
        description: decl.description.clone(),
        imports: decl.imports.clone(),
        routes,
    })
}

/// Parses one method declaration into a [`RouteMeta`].
///
/// ## Errors
///
/// - [`ParseError::InvalidMethod`] for an unknown verb
/// - [`ParseError::InvalidPath`] for computed or malformed templates, or
///   templates that disagree with the parameter list
/// - [`ParseError::UnsupportedParameterType`] for non-string parameters
/// - [`ParseError::MissingResponseType`] when no return type is declared
/// - [`ParseError::DuplicateParameter`] when a name repeats
pub fn parse_route(decl: &MethodDecl) -> Result<RouteMeta, ParseError> {
    let method = HttpMethod::from_str(decl.verb.trim())
        .map_err(|_| ParseError::InvalidMethod(decl.verb.clone()))?;

    let path = match &decl.path {
        PathArg::Literal(path) => path.clone(),
        PathArg::Computed { computed } => {
            return Err(ParseError::invalid_path(
                computed,
                "pass a literal string as the path argument",
            ));
        }
    };
    let placeholders = validate_template(&path)?;

    let response_type = match decl.returns.as_deref().map(str::trim) {
        None | Some("") => return Err(ParseError::MissingResponseType),
        Some(UNIT_TYPE) => None,
        Some(ty) => Some(ty.to_string()),
    };

    let mut seen = HashSet::new();
    for param in &decl.params {
        if !seen.insert(param.name.as_str()) {
            return Err(ParseError::DuplicateParameter(param.name.clone()));
        }
    }

    let mut body_type = None;
    let mut named = Vec::with_capacity(decl.params.len());
    for param in &decl.params {
        if method == HttpMethod::Post && param.name == BODY_PARAM {
            if placeholders.contains(&BODY_PARAM) {
                return Err(ParseError::invalid_path(
                    &path,
                    "the body parameter cannot also be a path parameter",
                ));
            }
            body_type = Some(param.ty.trim().to_string());
            continue;
        }
        named.push(classify_type(param)?);
    }

    let (path_parameters, query_parameters) = categorize(&placeholders, named);

    for placeholder in &placeholders {
        if !path_parameters.iter().any(|p| p.name == *placeholder) {
            return Err(ParseError::invalid_path(
                &path,
                format!("placeholder ':{placeholder}' has no matching parameter"),
            ));
        }
    }
    if let Some(optional) = path_parameters.iter().find(|p| p.is_optional) {
        return Err(ParseError::invalid_path(
            &path,
            format!("path parameter '{}' cannot be optional", optional.name),
        ));
    }

    Ok(RouteMeta {
        name: decl.name.clone(),
        path,
        method,
        path_parameters,
        query_parameters,
        body_type,
        response_type,
        description: decl.description.clone(),
    })
}

/// Splits parameters into path and query parameters.
///
/// A parameter is a path parameter iff its name is one of `placeholders`.
/// Path parameters come back in template order, query parameters in the
/// order they were given.
pub fn categorize(
    placeholders: &[&str],
    params: Vec<RouteParameter>,
) -> (Vec<RouteParameter>, Vec<RouteParameter>) {
    let (mut path, query): (Vec<_>, Vec<_>) = params
        .into_iter()
        .partition(|p| placeholders.contains(&p.name.as_str()));
    path.sort_by_key(|p| placeholders.iter().position(|name| *name == p.name));
    (path, query)
}

/// Explains why a router could not hold both routes, if it could not.
///
/// Two templates clash when they repeat the same verb and shape, or when
/// they name the same placeholder position differently after a shared prefix.
fn route_conflict(first: &RouteMeta, second: &RouteMeta) -> Option<String> {
    let left: Vec<&str> = first.path.split('/').collect();
    let right: Vec<&str> = second.path.split('/').collect();

    for (a, b) in left.iter().zip(right.iter()) {
        match (placeholder(a), placeholder(b)) {
            (Some(x), Some(y)) if x != y => {
                return Some(format!(
                    "placeholders ':{x}' and ':{y}' occupy the same path segment"
                ));
            }
            (Some(_), Some(_)) => {}
            _ if a == b => {}
            _ => return None,
        }
    }

    (left.len() == right.len() && first.method == second.method)
        .then(|| format!("both are {} {}", second.method, second.path))
}

/// Checks template syntax and returns its placeholders.
fn validate_template(path: &str) -> Result<Vec<&str>, ParseError> {
    if !path.starts_with('/') {
        return Err(ParseError::invalid_path(path, "must start with '/'"));
    }
    if path.contains('?') || path.contains('#') {
        return Err(ParseError::invalid_path(
            path,
            "query strings and fragments are declared as parameters, not in the path",
        ));
    }

    if let Some(segment) = path.split('/').find(|segment| {
        placeholder(segment).is_none()
            && (segment.starts_with('*') || segment.contains(['{', '}']))
    }) {
        return Err(ParseError::invalid_path(
            path,
            format!("literal segment '{segment}' uses reserved router syntax"),
        ));
    }

    let placeholders = extract_placeholders(path);
    let mut seen = HashSet::new();
    for name in &placeholders {
        if !is_placeholder_name(name) {
            return Err(ParseError::invalid_path(
                path,
                format!("':{name}' is not a valid placeholder name"),
            ));
        }
        if !seen.insert(*name) {
            return Err(ParseError::invalid_path(
                path,
                format!("placeholder ':{name}' appears more than once"),
            ));
        }
    }
    Ok(placeholders)
}

/// Maps a parameter declaration to a [`RouteParameter`].
fn classify_type(param: &ParamDecl) -> Result<RouteParameter, ParseError> {
    let ty: String = param.ty.chars().filter(|c| !c.is_whitespace()).collect();

    if is_string_type(&ty) {
        return Ok(RouteParameter::required(&param.name));
    }
    if let Some(inner) = option_inner(&ty)
        && is_string_type(inner)
    {
        return Ok(RouteParameter::optional(&param.name));
    }

    Err(ParseError::UnsupportedParameterType {
        name: param.name.clone(),
        ty: param.ty.trim().to_string(),
    })
}

fn is_string_type(ty: &str) -> bool {
    matches!(
        ty,
        "String" | "std::string::String" | "::std::string::String" | "alloc::string::String"
    )
}

fn option_inner(ty: &str) -> Option<&str> {
    ["Option<", "std::option::Option<", "::std::option::Option<", "core::option::Option<"]
        .iter()
        .find_map(|prefix| ty.strip_prefix(prefix))
        .and_then(|rest| rest.strip_suffix('>'))
}
