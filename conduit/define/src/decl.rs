//! Declaration model: the unparsed input to the route parser.
//!
//! A [`MethodDecl`] is what a service author writes down for one method:
//! a verb, a path argument, a parameter list and a return type, all kept as
//! plain text. Nothing here is validated; [`crate::parser::parse_route`]
//! turns a declaration into a [`crate::RouteMeta`] or reports why it cannot.
//!
//! Declarations come either from a schema file (see [`crate::schema`]) or
//! from the fluent builder:
//!
//! ```
//! use conduit_define::MethodDecl;
//!
//! let decl = MethodDecl::get("get_todo", "/todos/:id")
//!     .param("id", "String")
//!     .returns("Todo")
//!     .describe("Get a single todo by ID");
//!
//! assert_eq!(decl.verb, "GET");
//! assert_eq!(decl.params.len(), 1);
//! ```

use serde::Deserialize;

/// The path argument of a method declaration.
///
/// Only literal templates can be parsed. A computed path is kept so the
/// parser can report it rather than silently accepting it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PathArg {
    /// A literal path template such as `/todos/:id`.
    Literal(String),
    /// An expression that would only be known at run time.
    Computed {
        /// The expression text, for diagnostics.
        computed: String,
    },
}

impl PathArg {
    /// Creates a literal path argument.
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    /// Creates a computed path argument.
    pub fn computed(expr: impl Into<String>) -> Self {
        Self::Computed {
            computed: expr.into(),
        }
    }
}

/// One declared parameter: a name and its type, as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Parameter type text (e.g. `String`, `Option<String>`, `CreateTodoRequest`).
    #[serde(rename = "type")]
    pub ty: String,
}

/// One declared service method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodDecl {
    /// Method name (snake_case).
    pub name: String,
    /// HTTP verb text, e.g. `"GET"`.
    pub verb: String,
    /// Path argument.
    pub path: PathArg,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Return type text. `None` when the declaration has no return clause.
    #[serde(default)]
    pub returns: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl MethodDecl {
    /// Starts a declaration with an arbitrary verb.
    pub fn new(name: impl Into<String>, verb: impl Into<String>, path: PathArg) -> Self {
        Self {
            name: name.into(),
            verb: verb.into(),
            path,
            params: Vec::new(),
            returns: None,
            description: None,
        }
    }

    /// Starts a GET declaration with a literal path.
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, "GET", PathArg::literal(path))
    }

    /// Starts a POST declaration with a literal path.
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, "POST", PathArg::literal(path))
    }

    /// Appends a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Appends the `body` parameter with the given payload type.
    pub fn body(self, ty: impl Into<String>) -> Self {
        self.param("body", ty)
    }

    /// Sets the return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    /// Sets the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared service: a name plus its method declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDecl {
    /// Service name (PascalCase).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// `use` trees for the generated code.
    pub imports: Vec<String>,
    /// Method declarations in order.
    pub methods: Vec<MethodDecl>,
}

impl ServiceDecl {
    /// Creates an empty service declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            imports: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Adds an import.
    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    /// Adds a method declaration.
    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.methods.push(decl);
        self
    }

    /// Sets the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
