//! Todo store.
//!
//! # Responsibility
//! - Own the in-memory todo collection, including nested subtask mutation,
//!   and the todo category registry.
//! - Mirror every mutation into storage through the persistence queue.
//!
//! # Invariants
//! - Operations against an unknown todo id, or an unknown subtask id within
//!   a known todo, are silent no-ops and persist nothing.
//! - Category removal never cascades to todos still using the name.

use crate::model::category::CategoryRegistry;
use crate::model::todo::{Priority, SubTodo, Todo};
use crate::store::collection::{Entity, EntityCollection};
use crate::store::persist::PersistHandle;
use log::error;

impl Entity for Todo {
    fn id(&self) -> &str {
        &self.id
    }
}

/// In-memory todo collection plus persistence side effects.
pub struct TodoStore {
    collection: EntityCollection<Todo>,
    categories: CategoryRegistry,
    categories_key: String,
    persist: PersistHandle,
}

impl TodoStore {
    /// Creates an empty store persisting under `<namespace>:todos` and
    /// `<namespace>:todoCustomCategories`.
    pub fn new(namespace: &str, persist: PersistHandle) -> Self {
        Self {
            collection: EntityCollection::new(format!("{namespace}:todos"), persist.clone()),
            categories: CategoryRegistry::new(),
            categories_key: format!("{namespace}:todoCustomCategories"),
            persist,
        }
    }

    /// Replaces in-memory state from storage; same degraded-load behavior
    /// as the note store.
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

    pub fn todos(&self) -> &[Todo] {
        self.collection.items()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.collection.get(id)
    }

    /// Why the last load left the collection empty, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.collection.load_error()
    }

    /// Appends a fully-formed todo. Ids are the caller's contract.
    pub fn add(&mut self, todo: Todo) {
        self.collection.add(todo);
    }

    /// Removes the todo with the given id. Idempotent.
    pub fn delete(&mut self, id: &str) -> bool {
        self.collection.delete(id)
    }

    /// Flips the completion flag. No-op on unknown id.
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        self.collection.mutate(id, |todo| todo.completed = !todo.completed)
    }

    /// No-op on unknown id.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> bool {
        self.collection.mutate(id, |todo| todo.priority = priority)
    }

    /// Flips the subtask-list display flag. No-op on unknown id.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        self.collection.mutate(id, |todo| todo.expanded = !todo.expanded)
    }

    /// Appends a subtask to the given parent. No-op when the parent is
    /// unknown. Subtask id uniqueness is the caller's contract.
    pub fn add_subtask(&mut self, todo_id: &str, subtask: SubTodo) -> bool {
        self.collection
            .mutate(todo_id, |todo| todo.sub_todos.push(subtask))
    }

    /// Flips one subtask's completion flag. No-op when either the parent or
    /// the subtask id is unknown.
    pub fn toggle_subtask(&mut self, todo_id: &str, subtask_id: &str) -> bool {
        self.collection.mutate_where(todo_id, |todo| {
            match todo.sub_todos.iter_mut().find(|s| s.id == subtask_id) {
                Some(subtask) => {
                    subtask.completed = !subtask.completed;
                    true
                }
                None => false,
            }
        })
    }

    /// Removes one subtask. No-op when either id is unknown.
    pub fn delete_subtask(&mut self, todo_id: &str, subtask_id: &str) -> bool {
        self.collection.mutate_where(todo_id, |todo| {
            let before = todo.sub_todos.len();
            todo.sub_todos.retain(|s| s.id != subtask_id);
            todo.sub_todos.len() != before
        })
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

    /// Removes a custom category name; rejected for defaults. Todos still
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
