//! Validation of service definitions before code generation.
//!
//! Route parsing guarantees the shape of each route. This module checks what
//! only matters once the route is turned into Rust source:
//!
//! - **Identifiers**: service, route and parameter names must be usable as
//!   Rust identifiers (keywords rejected), and routes and parameters must
//!   not shadow names the generated client uses itself
//! - **Types**: body and response types must parse as Rust types
//! - **Imports**: every import must parse as a `use` tree
//! - **Naming collisions**: generated type names (`{Route}Path`,
//!   `{Route}Params`, `{Service}Client`, the service trait) must be unique and
//!   must not appear in any body or response type
//!
//! ## Examples
//!
//! ```
//! use conduit_define::{MethodDecl, ServiceDecl, parse_service};
//! use conduit_gen::validation::validate_service;
//!
//! let service = parse_service(
//!     &ServiceDecl::new("TodoApi")
//!         .method(MethodDecl::get("get_todo", "/todos/:id").param("id", "String").returns("Todo")),
//! )
//! .unwrap();
//!
//! assert!(validate_service(&service).is_ok());
//! ```

use std::collections::BTreeMap;

use conduit_define::{RouteMeta, ServiceDefinition};
use proc_macro2::{TokenStream, TokenTree};

use crate::errors::GeneratorError;
use crate::naming::to_pascal_case;

/// Suffix of generated path builder types.
pub const PATH_SUFFIX: &str = "Path";
/// Suffix of generated params structs.
pub const PARAMS_SUFFIX: &str = "Params";
/// Suffix of the generated client type.
pub const CLIENT_SUFFIX: &str = "Client";

/// Names the generated client method body uses for its own arguments and locals.
const RESERVED_PARAMETER_NAMES: &[&str] = &["config", "route_path", "route_query"];

/// Inherent methods every generated client already has.
const RESERVED_ROUTE_NAMES: &[&str] = &["new", "with_config", "from_http", "http"];

/// Validates a service definition before code generation.
///
/// ## Errors
///
/// - [`GeneratorError::InvalidIdentifier`] for unusable names
/// - [`GeneratorError::InvalidType`] for body or response types that do not parse
/// - [`GeneratorError::InvalidImport`] for imports that are not `use` trees
/// - [`GeneratorError::NamingCollision`] when generated names clash
pub fn validate_service(service: &ServiceDefinition) -> Result<(), GeneratorError> {
    check_identifier("service", &service.name)?;

    for import in &service.imports {
        syn::parse_str::<syn::UseTree>(import).map_err(|e| GeneratorError::InvalidImport {
            import: import.clone(),
            reason: e.to_string(),
        })?;
    }

    // generated type name -> route that produced it
    let mut generated: BTreeMap<String, String> = BTreeMap::new();
    generated.insert(service.name.clone(), service.name.clone());
    generated.insert(
        format!("{}{CLIENT_SUFFIX}", service.name),
        service.name.clone(),
    );

    for route in &service.routes {
        check_identifier("route", &route.name)?;
        if RESERVED_ROUTE_NAMES.contains(&route.name.as_str()) {
            return Err(GeneratorError::InvalidIdentifier {
                kind: "route",
                name: route.name.clone(),
                reason: "the generated client already has a method with this name".to_string(),
            });
        }
        for param in route.named_parameters() {
            check_identifier("parameter", &param.name)?;
            if RESERVED_PARAMETER_NAMES.contains(&param.name.as_str()) {
                return Err(GeneratorError::InvalidIdentifier {
                    kind: "parameter",
                    name: param.name.clone(),
                    reason: "the name is used by the generated client".to_string(),
                });
            }
        }

        for name in generated_type_names(route) {
            if let Some(previous) = generated.insert(name.clone(), route.name.clone()) {
                return Err(GeneratorError::NamingCollision {
                    route: route.name.clone(),
                    generated: name,
                    conflict: format!("the same name generated for '{previous}'"),
                });
            }
        }
    }

    for route in &service.routes {
        let declared = [
            ("body", route.body_type.as_deref()),
            ("response", route.response_type.as_deref()),
        ];
        for (context, ty) in declared {
            let Some(ty) = ty else { continue };
            let parsed = parse_type(route, context, ty)?;
            if let Some(clash) = type_idents(&parsed).find(|ident| generated.contains_key(ident)) {
                return Err(GeneratorError::NamingCollision {
                    route: route.name.clone(),
                    generated: clash,
                    conflict: format!("the {context} type '{ty}'"),
                });
            }
        }
    }

    Ok(())
}

/// Returns the type names generated for one route.
pub fn generated_type_names(route: &RouteMeta) -> Vec<String> {
    let base = to_pascal_case(&route.name);
    let mut names = Vec::new();
    if !route.path_parameters.is_empty() {
        names.push(format!("{base}{PATH_SUFFIX}"));
    }
    if route.has_named_parameters() {
        names.push(format!("{base}{PARAMS_SUFFIX}"));
    }
    names
}

/// Parses a declared type.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidType`] if `ty` is not a Rust type.
pub fn parse_type(
    route: &RouteMeta,
    context: &'static str,
    ty: &str,
) -> Result<syn::Type, GeneratorError> {
    syn::parse_str::<syn::Type>(ty).map_err(|e| GeneratorError::InvalidType {
        route: route.name.clone(),
        context,
        ty: ty.to_string(),
        reason: e.to_string(),
    })
}

fn check_identifier(kind: &'static str, name: &str) -> Result<(), GeneratorError> {
    syn::parse_str::<syn::Ident>(name)
        .map(|_| ())
        .map_err(|e| GeneratorError::InvalidIdentifier {
            kind,
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Yields every identifier appearing in a type.
fn type_idents(ty: &syn::Type) -> impl Iterator<Item = String> {
    let mut idents = Vec::new();
    collect_idents(quote::ToTokens::to_token_stream(ty), &mut idents);
    idents.into_iter()
}

fn collect_idents(tokens: TokenStream, out: &mut Vec<String>) {
    for token in tokens {
        match token {
            TokenTree::Ident(ident) => out.push(ident.to_string()),
            TokenTree::Group(group) => collect_idents(group.stream(), out),
            TokenTree::Punct(_) | TokenTree::Literal(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{route, service};
    use conduit_define::RouteParameter;

    #[test]
    fn valid_service_passes_validation() {
        let svc = service(vec![
            route("get_todo", "/todos/:id")
                .path(&["id"])
                .response("Todo"),
            route("create_todo", "/todos")
                .post()
                .body("CreateTodoRequest")
                .response("Todo"),
        ]);
        assert!(validate_service(&svc).is_ok());
    }

    #[test]
    fn keyword_route_name_is_rejected() {
        let svc = service(vec![route("match", "/match").response("()")]);
        let err = validate_service(&svc).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidIdentifier { kind: "route", .. }
        ));
    }

    #[test]
    fn client_method_names_are_reserved_for_routes() {
        for name in ["new", "with_config", "from_http", "http"] {
            let svc = service(vec![route(name, "/x").response("()")]);
            assert!(
                matches!(
                    validate_service(&svc),
                    Err(GeneratorError::InvalidIdentifier { kind: "route", .. })
                ),
                "expected '{name}' to be rejected"
            );
        }
    }

    #[test]
    fn keyword_parameter_is_rejected() {
        let svc = service(vec![
            route("find", "/find")
                .query(&[RouteParameter::optional("type")])
                .response("Found"),
        ]);
        assert!(matches!(
            validate_service(&svc),
            Err(GeneratorError::InvalidIdentifier {
                kind: "parameter",
                ..
            })
        ));
    }

    #[test]
    fn reserved_parameter_is_rejected() {
        let svc = service(vec![
            route("find", "/find")
                .query(&[RouteParameter::required("config")])
                .response("Found"),
        ]);
        let err = validate_service(&svc).unwrap_err();
        assert!(err.to_string().contains("config"));
    }

    #[test]
    fn unparsable_response_type_is_rejected() {
        let svc = service(vec![route("list", "/list").response("Vec<Todo")]);
        assert!(matches!(
            validate_service(&svc),
            Err(GeneratorError::InvalidType {
                context: "response",
                ..
            })
        ));
    }

    #[test]
    fn unparsable_import_is_rejected() {
        let mut svc = service(vec![]);
        svc.imports.push("crate::models::{Todo".to_string());
        assert!(matches!(
            validate_service(&svc),
            Err(GeneratorError::InvalidImport { .. })
        ));
    }

    #[test]
    fn body_type_colliding_with_params_struct_is_detected() {
        let svc = service(vec![
            route("complete_todo", "/todos/:id/complete")
                .post()
                .path(&["id"])
                .body("CompleteTodoParams")
                .response("Todo"),
        ]);
        let err = validate_service(&svc).unwrap_err();
        match err {
            GeneratorError::NamingCollision {
                route, generated, ..
            } => {
                assert_eq!(route, "complete_todo");
                assert_eq!(generated, "CompleteTodoParams");
            }
            other => panic!("expected NamingCollision, got {other:?}"),
        }
    }

    #[test]
    fn response_generic_argument_collision_is_detected() {
        let svc = service(vec![
            route("list", "/list").response("Vec<TestApiClient>"),
        ]);
        assert!(matches!(
            validate_service(&svc),
            Err(GeneratorError::NamingCollision { .. })
        ));
    }

    #[test]
    fn routes_generating_the_same_name_collide() {
        let svc = service(vec![
            route("get_item", "/a/:id").path(&["id"]).response("()"),
            route("get__item", "/b/:id").path(&["id"]).response("()"),
        ]);
        assert!(matches!(
            validate_service(&svc),
            Err(GeneratorError::NamingCollision { .. })
        ));
    }

    #[test]
    fn generated_names_depend_on_parameters() {
        let plain = route("clear_completed", "/todos/clear").post().response("()");
        assert!(generated_type_names(&plain.build()).is_empty());

        let query_only = route("list_todos", "/todos")
            .query(&[RouteParameter::optional("completed")])
            .response("Vec<Todo>");
        assert_eq!(
            generated_type_names(&query_only.build()),
            vec!["ListTodosParams".to_string()]
        );
    }
}
