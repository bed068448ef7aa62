//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory collection and drive persistence around mutations.
//! - Keep UI layers decoupled from storage details through `TodoActions`.

pub mod todo_service;
