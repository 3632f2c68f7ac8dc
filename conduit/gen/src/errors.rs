//! Error types for the conduit generator.

use conduit_define::{ParseError, SchemaError};
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read a schema file
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A method declaration could not be parsed into a route
    #[error("Failed to parse service definition: {0}")]
    Parse(#[from] ParseError),

    /// A service, route or parameter name is not a usable Rust identifier
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidIdentifier {
        /// What the name belongs to (`service`, `route`, `parameter`).
        kind: &'static str,
        name: String,
        reason: String,
    },

    /// A body or response type does not parse as a Rust type
    #[error("Invalid {context} type '{ty}' in route '{route}': {reason}")]
    InvalidType {
        route: String,
        /// `body` or `response`.
        context: &'static str,
        ty: String,
        reason: String,
    },

    /// An import does not parse as a `use` tree
    #[error("Invalid import '{import}': {reason}")]
    InvalidImport { import: String, reason: String },

    /// A generated type name clashes with a declared type or another generated name.
    #[error(
        "Naming collision in route '{route}': generated type '{generated}' conflicts with {conflict}"
    )]
    NamingCollision {
        route: String,
        generated: String,
        conflict: String,
    },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
