//! Params struct generation.
//!
//! The adapter decodes the merged path and query values of a request into a
//! `{Route}Params` struct; the server glue then takes it apart again to call
//! the service method with named arguments.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::docs::{doc_attrs, route_signature};
use super::model::RouteModel;

/// Generates the params struct for a route, or nothing if it has no named parameters.
pub fn generate_params_struct(model: &RouteModel<'_>) -> TokenStream {
    let Some(struct_name) = &model.params_ident else {
        return TokenStream::new();
    };

    let fields = model.route.named_parameters().map(|param| {
        let name = format_ident!("{}", param.name);
        if param.is_optional {
            quote! { pub #name: Option<String>, }
        } else {
            quote! { pub #name: String, }
        }
    });
    let docs = doc_attrs(&[format!(
        " Path and query values of {}.",
        route_signature(model.route)
    )]);

    quote! {
        #docs
        #[derive(Debug, Clone, PartialEq, Eq, ::conduit::serde::Deserialize)]
        #[serde(crate = "::conduit::serde")]
        pub struct #struct_name {
            #(#fields)*
        }
    }
}
