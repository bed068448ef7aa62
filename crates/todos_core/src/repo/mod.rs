//! Persistence layer: key-value stores and the todo storage adapter.
//!
//! # Responsibility
//! - Define the durable key-value contract the todo collection is stored in.
//! - Keep SQLite and JSON details out of the service layer.
//! - Own SQLite schema setup next to the only table that uses it.
//!
//! # Invariants
//! - The whole collection lives under one key and is written in full.
//! - Malformed stored values never reach callers of `TodoStorage::load`.

pub mod kv_store;
pub mod sqlite_store;
pub mod todo_store;
