//! Key-value store contract and implementations.
//!
//! # Responsibility
//! - Provide get/set of text values by key, the only storage primitive the
//!   todo adapter needs.
//! - Offer an in-memory store; the durable SQLite store lives in
//!   `sqlite_store`.
//!
//! # Invariants
//! - `set_item` overwrites the previous value in full.
//! - Stores are single-threaded; none of them is `Sync`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for store access and stored-value decoding.
#[derive(Debug)]
pub enum RepoError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    Codec(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::Codec(err) => write!(f, "stored value is not valid json: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Durable local key-value storage scoped to one profile.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_item(key, value)
    }
}

/// Process-local store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore};

    #[test]
    fn memory_store_overwrites_in_full() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "first").unwrap();
        store.set_item("k", "second").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));
    }
}
