//! Todo record and collection model.
//!
//! # Responsibility
//! - Define the canonical todo record and its wire shape.
//! - Apply the four collection transforms atomically on one in-memory list.
//! - Derive read-only counts for display.
//!
//! # Invariants
//! - `id` is generated once, never changes and is never reused.
//! - `title` is trimmed and never empty after any transform.
//! - Ids are unique inside one `TodoList`.
//! - New todos are prepended; otherwise insertion order is kept.
//! - `created_at` carries millisecond precision, matching its text form.
//! - `created_at` falls in years 0000..=9999, the range RFC 3339 can spell.

use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one todo.
pub type TodoId = Uuid;

/// Years a `createdAt` text value can hold (four digits, no sign).
const CREATED_AT_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Invariant violations for todo records and collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// The nil UUID is reserved and never identifies a todo.
    NilId,
    /// Title is empty or whitespace-only.
    EmptyTitle(TodoId),
    /// Two records in one collection share an id.
    DuplicateId(TodoId),
    /// Creation time has no four-digit-year text form.
    CreatedAtOutOfRange(TodoId),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be the nil uuid"),
            Self::EmptyTitle(id) => write!(f, "todo {id} has an empty title"),
            Self::DuplicateId(id) => write!(f, "duplicate todo id {id}"),
            Self::CreatedAtOutOfRange(id) => {
                write!(f, "todo {id} has a creation time outside years 0000-9999")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// One todo entry.
///
/// Fields are private: the id and creation time are immutable, and title and
/// completion only change through [`TodoList`] so its invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    title: String,
    completed: bool,
    /// Written as text, e.g. `2024-05-01T09:30:00.123Z`.
    #[serde(with = "created_at_text")]
    created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an open todo with a fresh id, stamped with the current time.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty after trimming.
    pub fn new(title: &str) -> Result<Self, TodoValidationError> {
        Self::with_id(Uuid::new_v4(), title, Utc::now())
    }

    /// Creates an open todo with a caller-provided id and creation time.
    ///
    /// Used by import paths and tests where identity already exists.
    /// `created_at` is truncated to milliseconds.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyTitle` when `title` is empty after trimming.
    /// - `CreatedAtOutOfRange` when `created_at` is outside years 0000-9999.
    pub fn with_id(
        id: TodoId,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id,
            title: title.trim().to_string(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle(self.id));
        }
        if !CREATED_AT_YEARS.contains(&self.created_at.year()) {
            return Err(TodoValidationError::CreatedAtOutOfRange(self.id));
        }
        Ok(())
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Counts derived from a collection. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
}

impl TodoStats {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

/// Ordered todo collection, newest first.
///
/// Serialized as a plain JSON array. Deserialization re-checks every
/// invariant, so a stored value that breaks one is rejected as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Todo>")]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from records in display order.
    ///
    /// # Errors
    /// - Any record-level violation, or `DuplicateId`.
    pub fn from_todos(items: Vec<Todo>) -> Result<Self, TodoValidationError> {
        let list = Self { items };
        list.validate()?;
        Ok(list)
    }

    /// Checks collection-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for todo in &self.items {
            todo.validate()?;
            if !seen.insert(todo.id) {
                return Err(TodoValidationError::DuplicateId(todo.id));
            }
        }
        Ok(())
    }

    /// Prepends a new open todo.
    ///
    /// Returns the new id, or `None` when `title` is blank (nothing changes).
    pub fn add(&mut self, title: &str) -> Option<TodoId> {
        let mut todo = Todo::new(title).ok()?;
        while self.contains(todo.id) {
            todo.id = Uuid::new_v4();
        }
        let id = todo.id;
        self.items.insert(0, todo);
        Some(id)
    }

    /// Renames a todo in place.
    ///
    /// Returns `false` without changing anything when the id is unknown, the
    /// trimmed title is empty, or it equals the current title.
    pub fn update(&mut self, id: TodoId, new_title: &str) -> bool {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(todo) if todo.title != trimmed => {
                todo.title = trimmed.to_string();
                true
            }
            _ => false,
        }
    }

    /// Flips the completion flag. Returns `false` when the id is unknown.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.get_mut(id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    /// Removes a todo, keeping the order of the rest.
    /// Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: TodoId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.items
    }

    pub fn stats(&self) -> TodoStats {
        TodoStats {
            total: self.items.len(),
            completed: self.items.iter().filter(|todo| todo.completed).count(),
        }
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == id)
    }

    fn get_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.items.iter_mut().find(|todo| todo.id == id)
    }
}

impl TryFrom<Vec<Todo>> for TodoList {
    type Error = TodoValidationError;

    fn try_from(items: Vec<Todo>) -> Result<Self, Self::Error> {
        Self::from_todos(items)
    }
}

impl Serialize for TodoList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Text codec for `createdAt`: RFC 3339, UTC, milliseconds, `Z` suffix.
mod created_at_text {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|value| value.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|err| D::Error::custom(format!("invalid createdAt `{text}`: {err}")))
    }
}
