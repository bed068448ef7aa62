//! Todo collection persistence adapter.
//!
//! # Responsibility
//! - Store and restore the whole todo collection under one fixed key.
//! - Recover locally from malformed stored values.
//!
//! # Invariants
//! - Writes replace the stored value in full; there are no delta writes.
//! - `load` never fails: absent or malformed values yield an empty list.
//! - Stored values are JSON arrays of `{id, title, completed, createdAt}`.

use crate::model::todo::{Todo, TodoList};
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{debug, error, info};

/// Storage key holding the serialized collection.
pub const TODOS_STORAGE_KEY: &str = "todos";

/// Adapter between a `TodoList` and a key-value store.
pub struct TodoStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TodoStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store, e.g. for maintenance on its connection.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the stored collection.
    ///
    /// Falls back to an empty list when nothing is stored, when the value
    /// cannot be decoded, or when the store itself fails. Failures are logged.
    pub fn load(&self) -> TodoList {
        match self.try_load() {
            Ok(Some(list)) => {
                info!(
                    "event=todos_load module=repo status=ok source=stored count={}",
                    list.len()
                );
                list
            }
            Ok(None) => {
                info!("event=todos_load module=repo status=ok source=empty count=0");
                TodoList::new()
            }
            Err(err) => {
                error!(
                    "event=todos_load module=repo status=error error_code={} error={err}",
                    load_error_code(&err)
                );
                TodoList::new()
            }
        }
    }

    /// Reads the stored collection, reporting why a stored value is rejected.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// - `Sqlite` when the store cannot be read.
    /// - `Codec` when the value is not a JSON array of todo records.
    /// - `InvalidData` when the records break a collection invariant.
    pub fn try_load(&self) -> RepoResult<Option<TodoList>> {
        let Some(raw) = self.store.get_item(TODOS_STORAGE_KEY)? else {
            return Ok(None);
        };

        let todos: Vec<Todo> = serde_json::from_str(&raw)?;
        let list =
            TodoList::from_todos(todos).map_err(|err| RepoError::InvalidData(err.to_string()))?;
        Ok(Some(list))
    }

    /// Writes the full collection, overwriting any previous value.
    pub fn save(&self, todos: &TodoList) -> RepoResult<()> {
        let raw = serde_json::to_string(todos)?;
        self.store.set_item(TODOS_STORAGE_KEY, &raw)?;
        debug!(
            "event=todos_save module=repo status=ok count={} bytes={}",
            todos.len(),
            raw.len()
        );
        Ok(())
    }
}

fn load_error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Sqlite(_) | RepoError::UnsupportedSchemaVersion { .. } => "store_read_failed",
        RepoError::Codec(_) => "malformed_json",
        RepoError::InvalidData(_) => "invariant_violation",
    }
}
