//! To-do domain model.
//!
//! # Responsibility
//! - Define the task record, its nested subtask list, and priority levels.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - Subtask ids are unique within their parent todo (caller contract).
//! - `expanded` is a display flag, but it is persisted alongside the data so
//!   list state survives a restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Nested checklist entry owned by a todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTodo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl SubTodo {
    /// Creates an uncompleted subtask with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable opaque id, assigned at creation.
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    /// One of the default category names or a user-added custom name.
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the subtask list is unfolded in the list view.
    pub expanded: bool,
    pub sub_todos: Vec<SubTodo>,
}

impl Todo {
    /// Creates a new open todo with a fresh id and medium priority.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            priority: Priority::Medium,
            category: category.into(),
            created_at: Utc::now(),
            due_date: None,
            expanded: false,
            sub_todos: Vec::new(),
        }
    }
}
