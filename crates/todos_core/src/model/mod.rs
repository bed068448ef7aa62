//! Domain model for the todo collection.
//!
//! # Responsibility
//! - Define the todo record and the ordered collection that owns it.
//! - Keep every collection transform (add/update/toggle/remove) in one place.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod todo;
