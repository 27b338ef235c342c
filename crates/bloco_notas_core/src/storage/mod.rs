//! Persistence adapter: a string-keyed store of serialized blobs.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract used by note and preference stores.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `set_item` replaces the whole value under a key.
//! - Reading a missing key is `Ok(None)`, never an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Storage key for the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "@bloco_notas:notes";
/// Storage key for the dark mode flag.
pub const DARK_MODE_STORAGE_KEY: &str = "@bloco_notas:dark_mode";

pub type StorageResult<T> = Result<T, StorageError>;

/// Read/write failure inside a persistence adapter.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backing table is absent from the opened database.
    MissingRequiredTable(&'static str),
    /// Adapter cannot serve requests (poisoned lock, injected failure).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed blob storage.
///
/// Methods take `&self` so one adapter can be shared by several stores
/// (typically through `Arc`).
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}
