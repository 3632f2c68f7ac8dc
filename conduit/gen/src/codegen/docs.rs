//! Doc comment generation for emitted items.
//!
//! Every line is returned with a leading space so that prettyplease renders
//! `#[doc = " text"]` as `/// text`.

use conduit_define::{RouteMeta, ServiceDefinition};
use proc_macro2::TokenStream;
use quote::quote;

/// Renders lines as `#[doc]` attributes.
pub fn doc_attrs(lines: &[String]) -> TokenStream {
    quote! { #(#[doc = #lines])* }
}

/// Returns the verb and template of a route, e.g. `` `GET /todos/:id` ``.
pub fn route_signature(route: &RouteMeta) -> String {
    format!("`{} {}`", route.method, route.path)
}

/// Documentation for a trait or client method.
pub fn route_docs(route: &RouteMeta) -> Vec<String> {
    let mut lines = description_lines(route.description.as_deref());
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(" {}", route_signature(route)));
    if route.is_no_content() {
        lines.push(String::new());
        lines.push(" Returns no content.".to_string());
    }
    lines
}

/// Documentation for a service-level item, followed by its route table.
///
/// `role` completes the sentence "{role} for the `Name` service.".
pub fn service_docs(service: &ServiceDefinition, role: &str) -> Vec<String> {
    let mut lines = vec![format!(" {role} for the `{}` service.", service.name)];
    let description = description_lines(service.description.as_deref());
    if !description.is_empty() {
        lines.push(String::new());
        lines.extend(description);
    }
    if !service.routes.is_empty() {
        lines.push(String::new());
        lines.push(" ## Routes".to_string());
        lines.push(String::new());
        for route in &service.routes {
            lines.push(format!(" - `{}`: {}", route.name, route_signature(route)));
        }
    }
    lines
}

fn description_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.lines().map(|line| format!(" {}", line.trim_end())).collect())
        .unwrap_or_default()
}
