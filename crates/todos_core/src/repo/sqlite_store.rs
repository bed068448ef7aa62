//! Durable key-value store on SQLite.
//!
//! # Responsibility
//! - Open the store file (or an in-memory database) and make sure the
//!   `kv_entries` table is in place before any read or write.
//! - Implement `KeyValueStore` as one row per key.
//!
//! # Invariants
//! - The schema version is stamped in `PRAGMA user_version`; files stamped
//!   by a newer build are refused instead of being read.
//! - `set_item` replaces the whole value and refreshes `updated_at`.

use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version this build writes and understands.
pub const SCHEMA_VERSION: u32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_KV_ENTRIES_SQL: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value store owning one SQLite connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (creating if needed) the store file at `path`.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    /// - `Sqlite` when the file cannot be opened or is not a SQLite database.
    /// - `UnsupportedSchemaVersion` when the file comes from a newer build.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Borrow of the underlying connection, for inspection and maintenance.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn open_with(
        mode: &'static str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> RepoResult<Self> {
        let started_at = Instant::now();
        let opened = connect()
            .map_err(RepoError::from)
            .and_then(|mut conn| prepare_schema(&mut conn).map(|()| conn));

        match opened {
            Ok(conn) => {
                info!(
                    "event=store_open module=repo status=ok mode={mode} schema_version={SCHEMA_VERSION} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn prepare_schema(conn: &mut Connection) -> RepoResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_ENTRIES_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    info!("event=store_schema module=repo status=ok from={found} to={SCHEMA_VERSION}");
    Ok(())
}

impl KeyValueStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
