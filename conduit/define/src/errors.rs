//! Error types for route parsing and schema loading.

use thiserror::Error;

/// Errors raised while turning declarations into route metadata.
///
/// All of these are fatal at build time: generation stops at the first one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The verb is not one of the supported HTTP methods.
    #[error("Invalid HTTP method '{0}' (expected GET or POST)")]
    InvalidMethod(String),

    /// The path argument is computed, malformed, or disagrees with the parameters.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path argument as written.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A non-body parameter is not `String` or `Option<String>`.
    #[error("Unsupported parameter type for '{name}': {ty}")]
    UnsupportedParameterType {
        /// Parameter name.
        name: String,
        /// Declared type text.
        ty: String,
    },

    /// The declaration has no usable return type.
    #[error("Missing response type")]
    MissingResponseType,

    /// Two parameters of one method share a name.
    #[error("Duplicate parameter '{0}'")]
    DuplicateParameter(String),

    /// Two methods of one service share a name.
    #[error("Duplicate route '{0}'")]
    DuplicateRoute(String),

    /// Two routes of one service cannot be told apart by a router.
    #[error("Route '{route}' conflicts with '{other}': {reason}")]
    ConflictingRoute {
        /// The later route.
        route: String,
        /// The earlier route it conflicts with.
        other: String,
        /// What makes them ambiguous.
        reason: String,
    },

    /// A method-level error, tagged with the method it came from.
    #[error("In method '{method}': {source}")]
    InMethod {
        /// Method name.
        method: String,
        /// Underlying error.
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the innermost error, skipping `InMethod` wrappers.
    pub fn root(&self) -> &ParseError {
        match self {
            Self::InMethod { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised while reading a schema file.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The file could not be read.
    #[error("Failed to read schema file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema layout.
    #[error("Invalid schema file '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_method_context() {
        let err = ParseError::InMethod {
            method: "get_todo".to_string(),
            source: Box::new(ParseError::MissingResponseType),
        };
        assert_eq!(err.root(), &ParseError::MissingResponseType);
        assert!(err.to_string().contains("get_todo"));
    }

    #[test]
    fn invalid_path_message_includes_reason() {
        let err = ParseError::invalid_path("todos", "must start with '/'");
        assert_eq!(err.to_string(), "Invalid path 'todos': must start with '/'");
    }
}
