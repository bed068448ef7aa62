//! Core domain logic for the todos workspace.
//! This crate is the single source of truth for collection invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Todo, TodoId, TodoList, TodoStats, TodoValidationError};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, RepoError, RepoResult};
pub use repo::sqlite_store::SqliteKvStore;
pub use repo::todo_store::{TodoStorage, TODOS_STORAGE_KEY};
pub use service::todo_service::{TodoActions, TodoService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
