//! Server glue generation.
//!
//! Emits `register_routes`, which registers every route of the service with
//! any `conduit::RouteBuilder`. The registration shape follows from the route:
//!
//! | Verb | Named params | Body | Call |
//! |------|--------------|------|------|
//! | GET | no | - | `register_get` |
//! | GET | yes | - | `register_get_with_params` |
//! | POST | no | any | `register_post` |
//! | POST | yes | any | `register_post_with_params` |
//!
//! POST routes without a declared body register with `conduit::NoBody`.

use conduit_define::HttpMethod;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::docs::{doc_attrs, service_docs};
use super::model::{RouteModel, ServiceModel};

/// Generates the `register_routes` function.
pub fn generate_register_routes(model: &ServiceModel<'_>) -> TokenStream {
    let trait_name = &model.trait_ident;
    let docs = doc_attrs(&service_docs(
        model.service,
        "Registers every route with a route builder",
    ));
    let registrations = model.routes.iter().map(generate_registration);

    quote! {
        #docs
        pub fn register_routes<S, B>(service: ::std::sync::Arc<S>, builder: &mut B)
        where
            S: #trait_name,
            B: ::conduit::RouteBuilder,
        {
            #(#registrations)*
        }
    }
}

fn generate_registration(model: &RouteModel<'_>) -> TokenStream {
    let route = model.route;
    let path = &route.path;
    let method = &model.method_ident;

    let mut call_args: Vec<TokenStream> = model
        .named_param_idents()
        .into_iter()
        .map(|ident| quote! { params.#ident })
        .collect();
    if model.body.is_some() {
        call_args.push(quote! { body });
    }

    let params_arg = model
        .params_ident
        .as_ref()
        .map(|params| quote! { params: #params });
    let body_arg = match (&model.body, route.method) {
        (Some(body), _) => Some(quote! { body: #body }),
        (None, HttpMethod::Post) => Some(quote! { _: ::conduit::NoBody }),
        (None, HttpMethod::Get) => None,
    };

    let register = match (route.method, params_arg.is_some()) {
        (HttpMethod::Get, false) => format_ident!("register_get"),
        (HttpMethod::Get, true) => format_ident!("register_get_with_params"),
        (HttpMethod::Post, false) => format_ident!("register_post"),
        (HttpMethod::Post, true) => format_ident!("register_post_with_params"),
    };
    let closure_args = params_arg.into_iter().chain(body_arg);

    quote! {
        {
            let service = ::std::sync::Arc::clone(&service);
            builder.#register(#path, move |#(#closure_args),*| {
                let service = ::std::sync::Arc::clone(&service);
                async move { service.#method(#(#call_args),*).await }
            });
        }
    }
}
