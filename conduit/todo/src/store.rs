//! In-memory todo storage.

use rand::Rng;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Todo;

/// Titles added by [`TodoStore::seed`].
pub const SEED_TITLES: [&str; 3] = [
    "Learn Conduit",
    "Build an API with SQLite",
    "Ship to production",
];

/// Todos in insertion order.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

/// Returns a fresh 16-character hex id.
fn new_id() -> String {
    let value: u64 = rand::thread_rng().r#gen();
    format!("{value:016x}")
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all todos, or only those whose flag equals `completed`.
    pub async fn list(&self, completed: Option<bool>) -> Vec<Todo> {
        self.todos
            .read()
            .await
            .iter()
            .filter(|todo| completed.is_none_or(|flag| todo.completed == flag))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Todo> {
        self.todos.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Adds an open todo with a fresh id.
    pub async fn create(&self, title: impl Into<String>) -> Todo {
        let mut todos = self.todos.write().await;
        push_open(&mut todos, title.into())
    }

    /// Sets the completed flag; `None` if there is no such todo.
    pub async fn update(&self, id: &str, completed: bool) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = completed;
        Some(todo.clone())
    }

    /// Removes completed todos and returns how many were removed.
    pub async fn clear_completed(&self) -> usize {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| !t.completed);
        before - todos.len()
    }

    /// Adds the starter todos, unless the store already has some.
    pub async fn seed(&self) {
        let mut todos = self.todos.write().await;
        if !todos.is_empty() {
            return;
        }
        for title in SEED_TITLES {
            push_open(&mut todos, title.to_string());
        }
    }
}

fn push_open(todos: &mut Vec<Todo>, title: String) -> Todo {
    let todo = Todo {
        id: new_id(),
        title,
        completed: false,
    };
    todos.push(todo.clone());
    debug!(id = %todo.id, "created todo");
    todo
}
