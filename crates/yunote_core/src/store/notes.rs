//! Note store.
//!
//! # Responsibility
//! - Own the in-memory note collection and the note category registry.
//! - Mirror every mutation into storage through the persistence queue.
//!
//! # Invariants
//! - `update` refreshes the note's edit timestamp before replacing it.
//! - Category removal never cascades to notes still using the name; they
//!   keep the stale category value.

use crate::model::category::CategoryRegistry;
use crate::model::note::Note;
use crate::store::collection::{Entity, EntityCollection};
use crate::store::persist::PersistHandle;
use log::error;

impl Entity for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

/// In-memory note collection plus persistence side effects.
pub struct NoteStore {
    collection: EntityCollection<Note>,
    categories: CategoryRegistry,
    categories_key: String,
    persist: PersistHandle,
}

impl NoteStore {
    /// Creates an empty store persisting under `<namespace>:notes` and
    /// `<namespace>:noteCustomCategories`.
    pub fn new(namespace: &str, persist: PersistHandle) -> Self {
        Self {
            collection: EntityCollection::new(format!("{namespace}:notes"), persist.clone()),
            categories: CategoryRegistry::new(),
            categories_key: format!("{namespace}:noteCustomCategories"),
            persist,
        }
    }

    /// Replaces in-memory state from storage.
    ///
    /// A failed or corrupt notes blob leaves the collection empty with
    /// [`load_error`](Self::load_error) set. A failed categories blob is
    /// logged and leaves the custom list empty.
    pub fn load(&mut self) {
        self.collection.load();

        match self.persist.read(&self.categories_key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(names) => self.categories.set_custom(names),
                Err(err) => error!(
                    "event=categories_load module=store status=error key={} error={err}",
                    self.categories_key
                ),
            },
            Ok(None) => self.categories.set_custom(Vec::new()),
            Err(err) => error!(
                "event=categories_load module=store status=error key={} error={err}",
                self.categories_key
            ),
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.collection.items()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.collection.get(id)
    }

    /// Why the last load left the collection empty, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.collection.load_error()
    }

    /// Appends a fully-formed note. Ids are the caller's contract; no
    /// collision check happens here.
    pub fn add(&mut self, note: Note) {
        self.collection.add(note);
    }

    /// Replaces the note with the same id, refreshing its edit timestamp.
    /// Silent no-op when the id is unknown.
    pub fn update(&mut self, mut note: Note) -> bool {
        note.touch();
        self.collection.update(note)
    }

    /// Removes the note with the given id. Idempotent.
    pub fn delete(&mut self, id: &str) -> bool {
        self.collection.delete(id)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Adds a custom category name; no-op when it already exists or shadows
    /// a default.
    pub fn add_custom_category(&mut self, name: &str) -> bool {
        if !self.categories.add_custom(name) {
            return false;
        }
        self.persist_categories();
        true
    }

    /// Removes a custom category name; rejected for defaults. Notes still
    /// referencing the name are left untouched.
    pub fn remove_custom_category(&mut self, name: &str) -> bool {
        if !self.categories.remove_custom(name) {
            return false;
        }
        self.persist_categories();
        true
    }

    fn persist_categories(&self) {
        match serde_json::to_string(self.categories.custom()) {
            Ok(json) => self.persist.write(&self.categories_key, json),
            Err(err) => error!(
                "event=persist_encode module=store status=error key={} error={err}",
                self.categories_key
            ),
        }
    }
}
