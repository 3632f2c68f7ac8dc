//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces for one service into a single Rust file, validating the
//! output, formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! One file per service, named after the service in snake_case:
//!
//! ```text
//! generated/
//! └── todo_api.rs    # TodoApi: path builders, params, trait, client, register_routes
//! ```
//!
//! The file holds items only (no inner attributes or module docs), so it can
//! be pulled into a module with `include!`.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Determinism**: The same service definition always produces the same bytes
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use conduit_define::{ServiceDefinition, load_service_file, parse_service};
use proc_macro2::TokenStream;
use quote::quote;
use tracing::{debug, info, instrument};

use crate::codegen::{
    ServiceModel, generate_client, generate_params_struct, generate_path_builder,
    generate_register_routes, generate_service_trait,
};
use crate::errors::GeneratorError;
use crate::naming::to_snake_case;
use crate::validation::validate_service;

/// Loads a schema file and parses it into a service definition.
///
/// ## Errors
///
/// Returns [`GeneratorError::Schema`] if the file cannot be read or is not a
/// schema, and [`GeneratorError::Parse`] if a method declaration is invalid.
#[instrument(skip_all, fields(schema = %path.as_ref().display()))]
pub fn load_service(path: impl AsRef<Path>) -> Result<ServiceDefinition, GeneratorError> {
    let decl = load_service_file(path.as_ref())?;
    let service = parse_service(&decl)?;
    debug!(
        service = %service.name,
        routes = service.routes.len(),
        "parsed service definition"
    );
    Ok(service)
}

/// Returns the file name generated code for `service` is written to.
///
/// ## Examples
///
/// ```
/// use conduit_define::ServiceDefinition;
/// use conduit_gen::output::module_file_name;
///
/// let service = ServiceDefinition {
///     name: "TodoApi".to_string(),
///     description: None,
///     imports: vec![],
///     routes: vec![],
/// };
/// assert_eq!(module_file_name(&service), "todo_api.rs");
/// ```
pub fn module_file_name(service: &ServiceDefinition) -> String {
    format!("{}.rs", to_snake_case(&service.name))
}

/// Assembles the module code for one service.
///
/// The module contains, in order:
/// - the service's imports
/// - path builders and params structs, route by route
/// - the service trait
/// - the client
/// - `register_routes`
///
/// ## Errors
///
/// Returns the first validation error for the service.
pub fn assemble_service_module(service: &ServiceDefinition) -> Result<TokenStream, GeneratorError> {
    validate_service(service)?;
    let model = ServiceModel::new(service)?;

    let imports = &model.imports;
    let route_types: TokenStream = model
        .routes
        .iter()
        .map(|route| {
            let path_builder = generate_path_builder(route);
            let params = generate_params_struct(route);
            quote! {
                #path_builder
                #params
            }
        })
        .collect();
    let service_trait = generate_service_trait(&model);
    let client = generate_client(&model);
    let register_routes = generate_register_routes(&model);

    Ok(quote! {
        #(use #imports;)*

        #route_types

        #service_trait

        #client

        #register_routes
    })
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Prepends an auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by conduit-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Generates the formatted source for one service without touching the disk.
///
/// ## Errors
///
/// Returns an error if the service fails validation or the generated code
/// does not parse.
#[instrument(skip_all, fields(service = %service.name))]
pub fn generate_service_code(service: &ServiceDefinition) -> Result<String, GeneratorError> {
    let tokens = assemble_service_module(service)?;
    let file = validate_code(&tokens)?;
    let code = format_code(&file);
    debug!(bytes = code.len(), "generated service module");
    Ok(code)
}

/// Writes content to a file atomically using temp file + rename.
///
/// Readers see either the old or the new content, never a mix.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates code for one service and writes it to `output_dir`.
///
/// In dry-run mode the code is printed instead of written.
///
/// ## Returns
///
/// The formatted module code.
///
/// ## Errors
///
/// Returns an error if:
/// - The service fails validation
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    service: &ServiceDefinition,
    output_dir: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let code = generate_service_code(service)?;
    let filename = module_file_name(service);

    if dry_run {
        println!("=== {} ===\n{}\n", filename, code);
    } else {
        let path = output_dir.join(&filename);
        write_atomic(&path, &code)?;
        info!(path = %path.display(), "wrote generated module");
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_todo_service, route, service};
    use tempfile::TempDir;

    #[test]
    fn assembled_module_is_valid_rust() {
        let tokens = assemble_service_module(&make_todo_service()).unwrap();
        assert!(validate_code(&tokens).is_ok());
    }

    #[test]
    fn imports_come_first() {
        let code = generate_service_code(&make_todo_service()).unwrap();
        let import = code
            .find("use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};")
            .unwrap();
        let first_struct = code.find("pub struct").unwrap();
        assert!(import < first_struct);
    }

    #[test]
    fn code_starts_with_banner_and_has_no_inner_attributes() {
        let code = generate_service_code(&make_todo_service()).unwrap();
        assert!(code.starts_with("// This code was automatically generated by conduit-gen."));
        assert!(!code.contains("#!["));
        assert!(!code.contains("//!"));
    }

    #[test]
    fn invalid_service_is_rejected_before_emission() {
        let svc = service(vec![route("fn", "/fn").response("()")]);
        assert!(matches!(
            generate_service_code(&svc),
            Err(GeneratorError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("todo_api.rs");

        write_atomic(&path, "// generated").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// generated");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn generate_and_write_uses_snake_case_file_name() {
        let temp_dir = TempDir::new().unwrap();

        let code = generate_and_write(&make_todo_service(), temp_dir.path(), false).unwrap();

        let written = fs::read_to_string(temp_dir.path().join("todo_api.rs")).unwrap();
        assert_eq!(written, code);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();

        generate_and_write(&make_todo_service(), temp_dir.path(), true).unwrap();

        assert!(!temp_dir.path().join("todo_api.rs").exists());
    }

    #[test]
    fn load_service_parses_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let schema = temp_dir.path().join("todo.toml");
        fs::write(
            &schema,
            r#"
[service]
name = "TodoApi"

[[method]]
name = "get_todo"
verb = "GET"
path = "/todos/:id"
params = [{ name = "id", type = "String" }]
returns = "Todo"
"#,
        )
        .unwrap();

        let service = load_service(&schema).unwrap();
        assert_eq!(service.routes[0].path_parameters[0].name, "id");
    }

    #[test]
    fn load_service_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let schema = temp_dir.path().join("bad.toml");
        fs::write(
            &schema,
            r#"
[service]
name = "Bad"

[[method]]
name = "remove"
verb = "DELETE"
path = "/x"
returns = "()"
"#,
        )
        .unwrap();

        let err = load_service(&schema).unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
        assert!(err.to_string().contains("remove"));
    }
}
