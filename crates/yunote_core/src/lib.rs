//! Core domain-state store for YuNote.
//! This crate is the single source of truth for note/todo business
//! invariants; rendering, navigation and identity live in the host app.

pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::category::{CategoryRegistry, DEFAULT_CATEGORIES};
pub use model::due::{due_summary, DueSummary, Urgency};
pub use model::note::{Attachment, AttachmentKind, Note};
pub use model::todo::{Priority, SubTodo, Todo};
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend, StorageError, StorageResult};
pub use store::collection::{Entity, EntityCollection};
pub use store::notes::NoteStore;
pub use store::persist::{PersistHandle, PersistQueue};
pub use store::todos::TodoStore;
pub use store::{AppStore, DEFAULT_NAMESPACE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
