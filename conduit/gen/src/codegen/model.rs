//! Resolved names and types for one service.
//!
//! Emitters work from a [`ServiceModel`] rather than from the raw
//! [`ServiceDefinition`], so identifiers and parsed types are computed (and
//! their failures reported) once, before any tokens are produced.

use conduit_define::{RouteMeta, RouteParameter, ServiceDefinition};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::errors::GeneratorError;
use crate::naming::to_pascal_case;
use crate::validation::{CLIENT_SUFFIX, PARAMS_SUFFIX, PATH_SUFFIX, parse_type};

/// A service with every generated name resolved.
pub struct ServiceModel<'a> {
    pub service: &'a ServiceDefinition,
    /// The service trait (`TodoApi`).
    pub trait_ident: Ident,
    /// The client type (`TodoApiClient`).
    pub client_ident: Ident,
    pub imports: Vec<syn::UseTree>,
    pub routes: Vec<RouteModel<'a>>,
}

/// A route with its generated names and parsed types.
pub struct RouteModel<'a> {
    pub route: &'a RouteMeta,
    /// Method name on the trait and the client.
    pub method_ident: Ident,
    /// `{Route}Path`, present when the route has path parameters.
    pub path_ident: Option<Ident>,
    /// `{Route}Params`, present when the route has named parameters.
    pub params_ident: Option<Ident>,
    pub body: Option<syn::Type>,
    /// `None` for no-content routes.
    pub response: Option<syn::Type>,
}

impl<'a> ServiceModel<'a> {
    /// Resolves names and types of a validated service.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::InvalidImport`] or
    /// [`GeneratorError::InvalidType`] if an import or type does not parse.
    pub fn new(service: &'a ServiceDefinition) -> Result<Self, GeneratorError> {
        let imports = service
            .imports
            .iter()
            .map(|import| {
                syn::parse_str::<syn::UseTree>(import).map_err(|e| GeneratorError::InvalidImport {
                    import: import.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let routes = service
            .routes
            .iter()
            .map(RouteModel::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            service,
            trait_ident: format_ident!("{}", service.name),
            client_ident: format_ident!("{}{}", service.name, CLIENT_SUFFIX),
            imports,
            routes,
        })
    }
}

impl<'a> RouteModel<'a> {
    fn new(route: &'a RouteMeta) -> Result<Self, GeneratorError> {
        let base = to_pascal_case(&route.name);
        let body = route
            .body_type
            .as_deref()
            .map(|ty| parse_type(route, "body", ty))
            .transpose()?;
        let response = route
            .response_type
            .as_deref()
            .map(|ty| parse_type(route, "response", ty))
            .transpose()?;

        Ok(Self {
            route,
            method_ident: format_ident!("{}", route.name),
            path_ident: (!route.path_parameters.is_empty())
                .then(|| format_ident!("{}{}", base, PATH_SUFFIX)),
            params_ident: route
                .has_named_parameters()
                .then(|| format_ident!("{}{}", base, PARAMS_SUFFIX)),
            body,
            response,
        })
    }

    /// The handler's success type; `()` for no-content routes.
    pub fn output_type(&self) -> TokenStream {
        match &self.response {
            Some(ty) => quote! { #ty },
            None => quote! { () },
        }
    }

    /// Identifiers of the path parameters, in template order.
    pub fn path_param_idents(&self) -> Vec<Ident> {
        idents(&self.route.path_parameters)
    }

    /// Identifiers of path then query parameters.
    pub fn named_param_idents(&self) -> Vec<Ident> {
        self.route
            .named_parameters()
            .map(|p| format_ident!("{}", p.name))
            .collect()
    }
}

fn idents(params: &[RouteParameter]) -> Vec<Ident> {
    params.iter().map(|p| format_ident!("{}", p.name)).collect()
}
