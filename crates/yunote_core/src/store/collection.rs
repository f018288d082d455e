//! Generic id-keyed entity collection with JSON persistence.
//!
//! # Responsibility
//! - Provide the one CRUD implementation shared by the note and todo stores
//!   instead of two near-identical copies.
//! - Mirror every mutation into storage as a full-collection JSON blob.
//!
//! # Invariants
//! - The in-memory collection is authoritative; storage is a best-effort
//!   durability mirror.
//! - Mutations against unknown ids are silent no-ops and do not persist.
//! - Load failures (unavailable or corrupt blob) set a non-fatal error flag
//!   and leave the collection empty; they never panic or propagate.

use crate::store::persist::PersistHandle;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record type storable in an [`EntityCollection`].
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Stable opaque id, unique within the collection (caller contract;
    /// `add` does not re-check it).
    fn id(&self) -> &str;
}

/// Ordered collection of records keyed by entity id, persisted as one JSON
/// array under a single storage key.
pub struct EntityCollection<T: Entity> {
    key: String,
    items: Vec<T>,
    load_error: Option<String>,
    persist: PersistHandle,
}

impl<T: Entity> EntityCollection<T> {
    pub fn new(key: impl Into<String>, persist: PersistHandle) -> Self {
        Self {
            key: key.into(),
            items: Vec::new(),
            load_error: None,
            persist,
        }
    }

    /// Replaces in-memory state from the persisted blob.
    ///
    /// On a read failure or a corrupt blob the collection stays empty and
    /// [`load_error`](Self::load_error) reports the cause.
    pub fn load(&mut self) {
        self.items.clear();
        self.load_error = None;

        match self.persist.read(&self.key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(items) => {
                    self.items = items;
                    info!(
                        "event=collection_load module=store status=ok key={} count={}",
                        self.key,
                        self.items.len()
                    );
                }
                Err(err) => {
                    error!(
                        "event=collection_load module=store status=error key={} error={err}",
                        self.key
                    );
                    self.load_error = Some(format!("corrupt blob under `{}`: {err}", self.key));
                }
            },
            Ok(None) => {
                info!(
                    "event=collection_load module=store status=ok key={} count=0 blob=absent",
                    self.key
                );
            }
            Err(err) => {
                error!(
                    "event=collection_load module=store status=error key={} error={err}",
                    self.key
                );
                self.load_error = Some(err.to_string());
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Why the last load left the collection empty, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Appends a fully-formed record and persists the collection.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
        self.persist_all();
    }

    /// Replaces the record with the same id. Returns `false` (no-op, nothing
    /// persisted) when the id is unknown.
    pub fn update(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                self.persist_all();
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id. Idempotent: a second call for
    /// the same id is a no-op and does not persist.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.persist_all();
        true
    }

    /// Edits the record with the given id in place and persists. Returns
    /// `false` when the id is unknown.
    pub fn mutate(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> bool {
        self.mutate_where(id, |item| {
            edit(item);
            true
        })
    }

    /// Edits the record with the given id in place, persisting only when the
    /// closure reports a change. Returns `false` when the id is unknown or
    /// the closure declined.
    pub fn mutate_where(&mut self, id: &str, edit: impl FnOnce(&mut T) -> bool) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id() == id) else {
            return false;
        };
        if !edit(item) {
            return false;
        }
        self.persist_all();
        true
    }

    /// Replaces the whole collection and persists it.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.persist_all();
    }

    fn persist_all(&self) {
        match serde_json::to_string(&self.items) {
            Ok(json) => self.persist.write(&self.key, json),
            // Serialization of plain data records does not fail in practice;
            // if it ever does, in-memory state stays authoritative.
            Err(err) => error!(
                "event=persist_encode module=store status=error key={} error={err}",
                self.key
            ),
        }
    }
}
