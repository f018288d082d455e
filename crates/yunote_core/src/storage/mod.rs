//! Key-value storage abstraction and backends.
//!
//! # Responsibility
//! - Define the backend contract the stores persist through: opaque string
//!   keys mapped to JSON string blobs.
//! - Keep storage transport details out of store/business code.
//!
//! # Invariants
//! - Backends treat values as opaque text; (de)serialization happens above.
//! - `set` on an existing key replaces the whole blob.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level error for key-value storage operations.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// Backend reported an operation failure without a typed cause.
    Backend(String),
    /// The persistence worker is gone; no further reads or writes will run.
    Disconnected,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
            Self::Disconnected => write!(f, "persistence worker disconnected"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Backend(_) => None,
            Self::Disconnected => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Device-local key-value storage contract.
///
/// Implementations are moved onto the persistence worker thread, which is
/// why the trait requires `Send` but not `Sync`.
pub trait StorageBackend: Send {
    /// Returns the blob stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
