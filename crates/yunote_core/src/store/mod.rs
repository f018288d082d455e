//! Domain-state stores and persistence plumbing.
//!
//! # Responsibility
//! - Bundle the note and todo stores behind one injectable container so
//!   lifecycle (init at app start, reset in tests) is explicit rather than
//!   ambient module state.
//!
//! # Invariants
//! - All storage traffic goes through one serialized persistence queue, so
//!   writes cannot reorder against each other or against loads.

pub mod collection;
pub mod notes;
pub mod persist;
pub mod todos;

use crate::storage::{StorageBackend, StorageResult};
use notes::NoteStore;
use persist::PersistQueue;
use todos::TodoStore;

/// Storage key prefix used when none is injected.
pub const DEFAULT_NAMESPACE: &str = "@YuNote";

/// Application state container: both entity stores plus the persistence
/// queue that mirrors them into the storage backend.
pub struct AppStore {
    notes: NoteStore,
    todos: TodoStore,
    // Declared after the stores so their queue handles drop first; the
    // queue's own drop then flushes what is queued and joins the worker.
    queue: PersistQueue,
}

impl AppStore {
    /// Opens a store over `backend` with the default key namespace.
    pub fn open(backend: impl StorageBackend + 'static) -> StorageResult<Self> {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    /// Opens a store with an injected key namespace (used by tests to keep
    /// fixtures apart).
    pub fn with_namespace(
        backend: impl StorageBackend + 'static,
        namespace: &str,
    ) -> StorageResult<Self> {
        let queue = PersistQueue::spawn(backend)?;
        let notes = NoteStore::new(namespace, queue.handle());
        let todos = TodoStore::new(namespace, queue.handle());
        Ok(Self {
            notes,
            todos,
            queue,
        })
    }

    /// Loads both stores from storage, replacing in-memory state.
    pub fn load(&mut self) {
        self.notes.load();
        self.todos.load();
    }

    /// Blocks until every persistence write enqueued so far was attempted.
    pub fn flush(&self) -> StorageResult<()> {
        self.queue.flush()
    }

    /// Number of persistence writes that failed so far; each one is a window
    /// where persisted state lags in-memory state.
    pub fn write_failures(&self) -> u64 {
        self.queue.write_failures()
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore {
        &mut self.notes
    }

    pub fn todos(&self) -> &TodoStore {
        &self.todos
    }

    pub fn todos_mut(&mut self) -> &mut TodoStore {
        &mut self.todos
    }
}
