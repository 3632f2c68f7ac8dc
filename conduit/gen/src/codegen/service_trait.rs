//! Service trait generation.
//!
//! The trait is what a service implementation provides. Each route becomes
//! one method taking its path parameters, then its query parameters, then
//! its body, all owned. Implementations may use `async fn`:
//!
//! ```ignore
//! impl TodoApi for TodoService {
//!     async fn get_todo(&self, id: String) -> Result<Todo, HandlerError> { ... }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::docs::{doc_attrs, route_docs, service_docs};
use super::model::{RouteModel, ServiceModel};

/// Generates the service trait.
pub fn generate_service_trait(model: &ServiceModel<'_>) -> TokenStream {
    let trait_name = &model.trait_ident;
    let docs = doc_attrs(&service_docs(model.service, "Server-side interface"));
    let methods = model.routes.iter().map(generate_trait_method);

    quote! {
        #docs
        pub trait #trait_name: Send + Sync + 'static {
            #(#methods)*
        }
    }
}

fn generate_trait_method(model: &RouteModel<'_>) -> TokenStream {
    let name = &model.method_ident;
    let docs = doc_attrs(&route_docs(model.route));
    let output = model.output_type();

    let mut args: Vec<TokenStream> = model
        .route
        .named_parameters()
        .map(|param| {
            let ident = format_ident!("{}", param.name);
            if param.is_optional {
                quote! { #ident: Option<String> }
            } else {
                quote! { #ident: String }
            }
        })
        .collect();
    if let Some(body) = &model.body {
        args.push(quote! { body: #body });
    }

    quote! {
        #docs
        fn #name(&self, #(#args),*)
            -> impl ::std::future::Future<Output = Result<#output, ::conduit::HandlerError>> + Send;
    }
}
