//! Server-side implementation of the generated `TodoApi` trait.

use conduit::HandlerError;
use tracing::debug;

use crate::api::TodoApi;
use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::store::TodoStore;

const NOT_FOUND: &str = "Todo not found";

/// Reads the `completed` query value. Anything but `true` or `false` means
/// no filter.
pub fn completed_filter(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct TodoService {
    store: TodoStore,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }
}

impl TodoApi for TodoService {
    async fn list_todos(&self, completed: Option<String>) -> Result<Vec<Todo>, HandlerError> {
        Ok(self.store.list(completed_filter(completed.as_deref())).await)
    }

    async fn get_todo(&self, id: String) -> Result<Todo, HandlerError> {
        self.store
            .get(&id)
            .await
            .ok_or_else(|| HandlerError::not_found(NOT_FOUND))
    }

    async fn create_todo(&self, body: CreateTodoRequest) -> Result<Todo, HandlerError> {
        Ok(self.store.create(body.title).await)
    }

    async fn complete_todo(&self, id: String, body: UpdateTodoRequest) -> Result<Todo, HandlerError> {
        self.store
            .update(&id, body.completed)
            .await
            .ok_or_else(|| HandlerError::not_found(NOT_FOUND))
    }

    async fn clear_completed(&self) -> Result<(), HandlerError> {
        let removed = self.store.clear_completed().await;
        debug!(removed, "cleared completed todos");
        Ok(())
    }
}
