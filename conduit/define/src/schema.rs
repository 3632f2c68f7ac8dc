//! TOML schema files.
//!
//! A schema file holds one `[service]` table and any number of `[[method]]`
//! tables:
//!
//! ```toml
//! [service]
//! name = "TodoApi"
//! description = "Todo list service"
//! imports = ["crate::models::{Todo, CreateTodoRequest}"]
//!
//! [[method]]
//! name = "get_todo"
//! verb = "GET"
//! path = "/todos/:id"
//! params = [{ name = "id", type = "String" }]
//! returns = "Todo"
//! ```
//!
//! Loading only checks the file layout. The declarations still go through
//! [`crate::parse_service`] before anything is generated from them.

use std::path::Path;

use serde::Deserialize;

use crate::decl::{MethodDecl, ServiceDecl};
use crate::errors::SchemaError;

/// Label used in errors for schemas that did not come from a file.
const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    service: ServiceHeader,
    #[serde(default)]
    method: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceHeader {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    imports: Vec<String>,
}

impl From<SchemaFile> for ServiceDecl {
    fn from(file: SchemaFile) -> Self {
        Self {
            name: file.service.name,
            description: file.service.description,
            imports: file.service.imports,
            methods: file.method,
        }
    }
}

impl ServiceDecl {
    /// Reads a service declaration from TOML text.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::Toml`] if the text is not valid TOML or does
    /// not have the schema layout.
    pub fn from_toml_str(text: &str) -> Result<Self, SchemaError> {
        parse_schema(text, INLINE_SOURCE)
    }
}

/// Reads a service declaration from a schema file.
///
/// ## Errors
///
/// Returns [`SchemaError::Read`] if the file cannot be read and
/// [`SchemaError::Toml`] if its contents do not parse.
pub fn load_service_file(path: impl AsRef<Path>) -> Result<ServiceDecl, SchemaError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: display.clone(),
        source,
    })?;
    parse_schema(&text, &display)
}

fn parse_schema(text: &str, source_name: &str) -> Result<ServiceDecl, SchemaError> {
    toml::from_str::<SchemaFile>(text)
        .map(ServiceDecl::from)
        .map_err(|source| SchemaError::Toml {
            path: source_name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::PathArg;
    use std::io::Write;

    const TODO_SCHEMA: &str = r#"
[service]
name = "TodoApi"
description = "Todo list service"
imports = ["crate::models::{Todo, CreateTodoRequest}"]

[[method]]
name = "list_todos"
verb = "GET"
path = "/todos"
params = [{ name = "completed", type = "Option<String>" }]
returns = "Vec<Todo>"

[[method]]
name = "create_todo"
verb = "POST"
path = "/todos"
params = [{ name = "body", type = "CreateTodoRequest" }]
returns = "Todo"
description = "Create a todo"
"#;

    #[test]
    fn parses_service_and_methods_in_order() {
        let decl = ServiceDecl::from_toml_str(TODO_SCHEMA).unwrap();

        assert_eq!(decl.name, "TodoApi");
        assert_eq!(decl.description.as_deref(), Some("Todo list service"));
        assert_eq!(decl.imports.len(), 1);
        assert_eq!(decl.methods.len(), 2);
        assert_eq!(decl.methods[0].name, "list_todos");
        assert_eq!(decl.methods[0].path, PathArg::literal("/todos"));
        assert_eq!(decl.methods[1].params[0].ty, "CreateTodoRequest");
        assert_eq!(decl.methods[1].description.as_deref(), Some("Create a todo"));
    }

    #[test]
    fn computed_path_table_is_kept() {
        let decl = ServiceDecl::from_toml_str(
            r#"
[service]
name = "Svc"

[[method]]
name = "x"
verb = "GET"
path = { computed = "format!(\"/{}\", BASE)" }
returns = "()"
"#,
        )
        .unwrap();

        assert!(matches!(decl.methods[0].path, PathArg::Computed { .. }));
    }

    #[test]
    fn missing_returns_is_left_for_the_parser() {
        let decl = ServiceDecl::from_toml_str(
            r#"
[service]
name = "Svc"

[[method]]
name = "x"
verb = "GET"
path = "/x"
"#,
        )
        .unwrap();

        assert_eq!(decl.methods[0].returns, None);
        assert!(decl.methods[0].params.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ServiceDecl::from_toml_str(
            r#"
[service]
name = "Svc"
base_url = "http://localhost"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::Toml { ref path, .. } if path == "<inline>"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TODO_SCHEMA.as_bytes()).unwrap();

        let decl = load_service_file(file.path()).unwrap();
        assert_eq!(decl.name, "TodoApi");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_service_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SchemaError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
