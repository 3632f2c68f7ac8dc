//! Shared test utilities for conduit-gen unit tests.

use conduit_define::{HttpMethod, RouteMeta, RouteParameter, ServiceDefinition};
use proc_macro2::TokenStream;

/// Fluent builder for route fixtures.
#[derive(Debug, Clone)]
pub struct TestRoute(RouteMeta);

/// Starts a GET route with no parameters and no content.
pub fn route(name: &str, path: &str) -> TestRoute {
    TestRoute(RouteMeta {
        name: name.to_string(),
        path: path.to_string(),
        method: HttpMethod::Get,
        path_parameters: vec![],
        query_parameters: vec![],
        body_type: None,
        response_type: None,
        description: None,
    })
}

impl TestRoute {
    pub fn post(mut self) -> Self {
        self.0.method = HttpMethod::Post;
        self
    }

    /// Sets required path parameters, in template order.
    pub fn path(mut self, names: &[&str]) -> Self {
        self.0.path_parameters = names.iter().map(|n| RouteParameter::required(*n)).collect();
        self
    }

    pub fn query(mut self, params: &[RouteParameter]) -> Self {
        self.0.query_parameters = params.to_vec();
        self
    }

    pub fn body(mut self, ty: &str) -> Self {
        self.0.body_type = Some(ty.to_string());
        self
    }

    /// Sets the response type; `"()"` means no content.
    pub fn response(mut self, ty: &str) -> Self {
        self.0.response_type = (ty != "()").then(|| ty.to_string());
        self
    }

    pub fn describe(mut self, text: &str) -> Self {
        self.0.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> RouteMeta {
        self.0
    }
}

/// Creates a service named `TestApi` holding the given routes.
pub fn service(routes: Vec<TestRoute>) -> ServiceDefinition {
    ServiceDefinition {
        name: "TestApi".to_string(),
        description: Some("Test API".to_string()),
        imports: vec![],
        routes: routes.into_iter().map(TestRoute::build).collect(),
    }
}

/// Creates the todo service used across generator tests.
pub fn make_todo_service() -> ServiceDefinition {
    ServiceDefinition {
        name: "TodoApi".to_string(),
        description: Some("Todo list service".to_string()),
        imports: vec!["crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest}".to_string()],
        routes: vec![
            route("list_todos", "/todos")
                .query(&[RouteParameter::optional("completed")])
                .response("Vec<Todo>")
                .describe("List todos, optionally filtered by completion")
                .build(),
            route("get_todo", "/todos/:id")
                .path(&["id"])
                .response("Todo")
                .build(),
            route("create_todo", "/todos")
                .post()
                .body("CreateTodoRequest")
                .response("Todo")
                .build(),
            route("complete_todo", "/todos/:id/complete")
                .post()
                .path(&["id"])
                .body("UpdateTodoRequest")
                .response("Todo")
                .build(),
            route("clear_completed", "/todos/clear-completed")
                .post()
                .response("()")
                .build(),
        ],
    }
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

/// Strips whitespace and trailing commas so assertions survive line wrapping.
pub fn compact(code: &str) -> String {
    let stripped: String = code.chars().filter(|c| !c.is_whitespace()).collect();
    stripped
        .replace(",)", ")")
        .replace(",}", "}")
        .replace(",]", "]")
}
