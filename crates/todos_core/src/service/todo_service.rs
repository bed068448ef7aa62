//! Todo use-case service.
//!
//! # Responsibility
//! - Hold the single in-memory source of truth for the todo collection.
//! - Hydrate it once on open and persist it after every change.
//! - Expose the four collection operations as the `TodoActions` capability.
//!
//! # Invariants
//! - Callers never mutate the collection directly.
//! - Only operations that changed the collection write to storage.
//! - Persistence failures are logged and never surfaced to callers.

use crate::model::todo::{TodoId, TodoList, TodoStats};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::todo_store::TodoStorage;
use log::{debug, warn};

/// Operations a presentation layer may invoke on the todo collection.
///
/// Unknown ids and blank titles are no-ops, reported as `false`/`None`.
pub trait TodoActions {
    /// Prepends a todo built from the trimmed `title`.
    fn add(&mut self, title: &str) -> Option<TodoId>;
    /// Renames a todo when the trimmed title is non-empty and different.
    fn update(&mut self, id: TodoId, title: &str) -> bool;
    /// Flips a todo's completion flag.
    fn toggle(&mut self, id: TodoId) -> bool;
    /// Removes a todo permanently.
    fn delete(&mut self, id: TodoId) -> bool;
    /// Current collection, newest first.
    fn todos(&self) -> &TodoList;

    fn stats(&self) -> TodoStats {
        self.todos().stats()
    }
}

/// Owning controller over the todo collection and its storage.
pub struct TodoService<S: KeyValueStore> {
    storage: TodoStorage<S>,
    todos: TodoList,
}

impl<S: KeyValueStore> TodoService<S> {
    /// Hydrates the collection from storage.
    ///
    /// Never fails: unreadable storage starts an empty collection.
    pub fn open(storage: TodoStorage<S>) -> Self {
        let todos = storage.load();
        Self { storage, todos }
    }

    pub fn storage(&self) -> &TodoStorage<S> {
        &self.storage
    }

    fn finish(&self, op: &'static str, changed: bool) {
        debug!("event=todo_{op} module=service status=ok changed={changed}");
        if !changed {
            return;
        }
        if let Err(err) = self.storage.save(&self.todos) {
            warn!(
                "event=todos_save module=service status=error op={op} error_code=save_failed error={err}"
            );
        }
    }
}

impl<S: KeyValueStore> TodoActions for TodoService<S> {
    fn add(&mut self, title: &str) -> Option<TodoId> {
        let id = self.todos.add(title);
        self.finish("add", id.is_some());
        id
    }

    fn update(&mut self, id: TodoId, title: &str) -> bool {
        let changed = self.todos.update(id, title);
        self.finish("update", changed);
        changed
    }

    fn toggle(&mut self, id: TodoId) -> bool {
        let changed = self.todos.toggle(id);
        self.finish("toggle", changed);
        changed
    }

    fn delete(&mut self, id: TodoId) -> bool {
        let changed = self.todos.remove(id);
        self.finish("delete", changed);
        changed
    }

    fn todos(&self) -> &TodoList {
        &self.todos
    }
}
