//! SQLite-backed adapter over the `kv_store` table.
//!
//! # Invariants
//! - The wrapped connection has passed `db::open_db*` bootstrap (migrations
//!   applied); `try_new` re-checks that `kv_store` exists.
//! - Each `set_item` is a single upsert statement, so a value is either
//!   fully replaced or left untouched.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const KV_TABLE: &str = "kv_store";

/// Device store adapter.
///
/// Owns its connection behind a mutex so the adapter can be shared across
/// threads (the FFI layer keeps one per process).
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `kv_store` does not exist.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        if !table_exists(&conn, KV_TABLE)? {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (creating if needed) the device store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("sqlite connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=storage status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
