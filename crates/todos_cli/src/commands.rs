//! Subcommand execution against the `TodoActions` capability.
//!
//! # Responsibility
//! - Translate parsed subcommands into collection operations.
//! - Render the collection and its counts as plain text.
//!
//! # Invariants
//! - Only ids present in the collection reach the core; lookups that miss
//!   are reported here instead.

use crate::error::CliError;
use clap::Subcommand;
use std::io::Write;
use todos_core::{Todo, TodoActions, TodoId, TodoList, TodoStats};

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all todos, newest first.
    List,
    /// Add a todo. Words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Rename a todo.
    Edit {
        /// Full id or a unique prefix of one.
        id: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Mark a todo done, or open again.
    Toggle {
        /// Full id or a unique prefix of one.
        id: String,
    },
    /// Remove a todo.
    Delete {
        /// Full id or a unique prefix of one.
        id: String,
    },
    /// Print total, completed and remaining counts.
    Stats,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
            Self::Stats => "stats",
        }
    }
}

pub fn execute(
    command: Command,
    todos: &mut impl TodoActions,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::List => write_list(todos.todos(), out)?,
        Command::Add { title } => match todos.add(&title.join(" ")) {
            Some(id) => writeln!(out, "Added {}", short_id(id))?,
            None => writeln!(out, "Nothing to add: title is empty")?,
        },
        Command::Edit { id, title } => {
            let id = resolve_id(todos.todos(), &id)?;
            if todos.update(id, &title.join(" ")) {
                writeln!(out, "Updated {}", short_id(id))?;
            } else {
                writeln!(out, "Unchanged {}: title is empty or the same", short_id(id))?;
            }
        }
        Command::Toggle { id } => {
            let id = resolve_id(todos.todos(), &id)?;
            todos.toggle(id);
            let done = todos.todos().get(id).is_some_and(Todo::is_completed);
            let verb = if done { "Completed" } else { "Reopened" };
            writeln!(out, "{verb} {}", short_id(id))?;
        }
        Command::Delete { id } => {
            let id = resolve_id(todos.todos(), &id)?;
            todos.delete(id);
            writeln!(out, "Deleted {}", short_id(id))?;
        }
        Command::Stats => write_stats(todos.stats(), out)?,
    }
    Ok(())
}

/// Finds the single todo whose id starts with `raw` (case-insensitive).
pub fn resolve_id(todos: &TodoList, raw: &str) -> Result<TodoId, CliError> {
    let prefix = raw.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return Err(CliError::UnknownId(raw.to_string()));
    }

    let matches: Vec<TodoId> = todos
        .iter()
        .map(Todo::id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::UnknownId(raw.to_string())),
        many => Err(CliError::AmbiguousId {
            prefix: raw.to_string(),
            matches: many.len(),
        }),
    }
}

fn short_id(id: TodoId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

fn write_list(todos: &TodoList, out: &mut impl Write) -> std::io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "No todos yet. Add one with `todos add <title>`.");
    }

    for todo in todos {
        let mark = if todo.is_completed() { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", short_id(todo.id()), todo.title())?;
    }
    writeln!(out)?;
    write_stats(todos.stats(), out)
}

fn write_stats(stats: TodoStats, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Total: {}  Completed: {}  Remaining: {}",
        stats.total,
        stats.completed,
        stats.remaining()
    )
}
