//! Code generation modules for conduit.
//!
//! Each submodule emits one kind of item for a service. All generators are
//! pure functions of a [`ServiceModel`]; the same model always yields the
//! same tokens.
//!
//! ## Submodules
//!
//! - [`model`] - Resolves generated names and parses declared types once
//! - [`path_builder`] - `{Route}Path` types that substitute path parameters
//! - [`params`] - `{Route}Params` structs the adapter decodes requests into
//! - [`service_trait`] - The trait a service implementation provides
//! - [`client`] - `{Service}Client` with one async method per route
//! - [`server`] - `register_routes`, binding the trait to a route builder
//! - [`docs`] - Doc comment lines shared by the emitters
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod client;
pub mod docs;
pub mod model;
pub mod params;
pub mod path_builder;
pub mod server;
pub mod service_trait;

pub use client::generate_client;
pub use model::{RouteModel, ServiceModel};
pub use params::generate_params_struct;
pub use path_builder::generate_path_builder;
pub use server::generate_register_routes;
pub use service_trait::generate_service_trait;
