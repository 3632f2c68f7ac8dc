//! Path builder generation.
//!
//! For every route with path parameters, emits a `{Route}Path` value type
//! holding the parameter values in template order and a `build()` method that
//! substitutes them into the template. Each value is percent-encoded as a
//! single path segment, so a value containing `/` or `?` cannot change the
//! shape of the URL.
//!
//! ## Examples
//!
//! For `GET /todos/:id/complete` the generated code is:
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! pub struct CompleteTodoPath {
//!     pub id: String,
//! }
//!
//! impl CompleteTodoPath {
//!     pub const TEMPLATE: &'static str = "/todos/:id/complete";
//!
//!     pub fn new(id: impl Into<String>) -> Self { ... }
//!
//!     pub fn build(&self) -> String {
//!         format!("/todos/{}/complete", ::conduit::path::encode_segment(&self.id))
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::docs::{doc_attrs, route_signature};
use super::model::RouteModel;

/// Generates the path builder for a route, or nothing if it has no path parameters.
pub fn generate_path_builder(model: &RouteModel<'_>) -> TokenStream {
    let Some(struct_name) = &model.path_ident else {
        return TokenStream::new();
    };

    let template = &model.route.path;
    let fields = model.path_param_idents();
    let format_string = format_string(template);
    let docs = doc_attrs(&[format!(" Path for {}.", route_signature(model.route))]);

    quote! {
        #docs
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct #struct_name {
            #(pub #fields: String,)*
        }

        impl #struct_name {
            /// The path template this builder fills in.
            pub const TEMPLATE: &'static str = #template;

            pub fn new(#(#fields: impl Into<String>),*) -> Self {
                Self {
                    #(#fields: #fields.into(),)*
                }
            }

            /// Returns the concrete path with every value percent-encoded.
            pub fn build(&self) -> String {
                format!(#format_string, #(::conduit::path::encode_segment(&self.#fields)),*)
            }
        }
    }
}

/// Turns a `:name` template into a `format!` string with one `{}` per placeholder.
fn format_string(template: &str) -> String {
    template
        .split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                "{}".to_string()
            } else {
                segment.replace('{', "{{").replace('}', "}}")
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
