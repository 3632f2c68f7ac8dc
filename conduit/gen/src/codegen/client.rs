//! Client generation.
//!
//! Emits `{Service}Client`, a thin typed wrapper around
//! `conduit::HttpClient` with one async method per route. Each method:
//!
//! 1. builds the path through the route's path builder, or uses the literal path
//! 2. appends only the query parameters that are present
//! 3. serializes the body as JSON on POST routes that declare one
//! 4. sends under the client's configuration merged with the per-call override
//! 5. decodes the declared response type, or discards the payload of a
//!    no-content route

use conduit_define::HttpMethod;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::docs::{doc_attrs, route_docs, service_docs};
use super::model::{RouteModel, ServiceModel};

/// Generates the client struct and its methods.
pub fn generate_client(model: &ServiceModel<'_>) -> TokenStream {
    let client_name = &model.client_ident;
    let docs = doc_attrs(&service_docs(model.service, "Typed client"));
    let methods = model.routes.iter().map(generate_client_method);

    quote! {
        #docs
        #[derive(Debug, Clone)]
        pub struct #client_name {
            http: ::conduit::HttpClient,
        }

        impl #client_name {
            /// Creates a client for the service at `base_url`.
            pub fn new(base_url: &str) -> Result<Self, ::conduit::ClientError> {
                Ok(Self::from_http(::conduit::HttpClient::new(base_url)?))
            }

            /// Creates a client whose calls all start from `config`.
            pub fn with_config(
                base_url: &str,
                config: ::conduit::ClientConfig,
            ) -> Result<Self, ::conduit::ClientError> {
                Ok(Self::from_http(::conduit::HttpClient::with_config(base_url, config)?))
            }

            /// Wraps an existing transport.
            pub fn from_http(http: ::conduit::HttpClient) -> Self {
                Self { http }
            }

            pub fn http(&self) -> &::conduit::HttpClient {
                &self.http
            }

            #(#methods)*
        }
    }
}

fn generate_client_method(model: &RouteModel<'_>) -> TokenStream {
    let route = model.route;
    let name = &model.method_ident;
    let docs = doc_attrs(&route_docs(route));
    let output = model.output_type();

    let mut args: Vec<TokenStream> = route
        .named_parameters()
        .map(|param| {
            let ident = format_ident!("{}", param.name);
            if param.is_optional {
                quote! { #ident: Option<&str> }
            } else {
                quote! { #ident: &str }
            }
        })
        .collect();
    if let Some(body) = &model.body {
        args.push(quote! { body: &#body });
    }
    args.push(quote! { config: Option<&::conduit::ClientConfig> });

    let path_expr = match &model.path_ident {
        Some(builder) => {
            let fields = model.path_param_idents();
            quote! { let route_path = #builder::new(#(#fields),*).build(); }
        }
        None => {
            let literal = &route.path;
            quote! { let route_path = #literal; }
        }
    };

    let query_expr = if route.query_parameters.is_empty() {
        quote! { let route_query: [(&str, &str); 0] = []; }
    } else {
        let pushes = route.query_parameters.iter().map(|param| {
            let ident = format_ident!("{}", param.name);
            let key = &param.name;
            if param.is_optional {
                quote! {
                    if let Some(value) = #ident {
                        route_query.push((#key, value));
                    }
                }
            } else {
                quote! { route_query.push((#key, #ident)); }
            }
        });
        quote! {
            let mut route_query: Vec<(&str, &str)> = Vec::new();
            #(#pushes)*
        }
    };

    let method = match route.method {
        HttpMethod::Get => quote! { ::conduit::HttpMethod::Get },
        HttpMethod::Post => quote! { ::conduit::HttpMethod::Post },
    };
    let send = if model.body.is_some() {
        quote! { self.http.send_json(#method, &route_path, &route_query, body, config) }
    } else {
        quote! { self.http.send(#method, &route_path, &route_query, config) }
    };
    let decode = match &model.response {
        Some(ty) => quote! { reply.json::<#ty>() },
        None => quote! { reply.empty() },
    };

    quote! {
        #docs
        pub async fn #name(&self, #(#args),*) -> Result<#output, ::conduit::ClientError> {
            #path_expr
            #query_expr
            let reply = #send.await?;
            #decode
        }
    }
}
