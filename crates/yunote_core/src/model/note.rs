//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its attachment sub-records.
//! - Provide constructors that assign fresh ids and timestamps.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at` is refreshed on every edit (see `NoteStore::update`).
//! - Attachment ids are unique within one note (caller contract; the store
//!   does not re-check it).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of external resource attached to a note.
///
/// The `uri` it points at is opaque to the store: a device file path or a
/// remote URL, never validated or dereferenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
    Audio,
}

/// External resource reference carried by a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub uri: String,
    pub name: String,
    /// Size in bytes, when the picker reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Playback length in seconds, for audio recordings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Attachment {
    /// Creates an attachment with a generated id.
    pub fn new(kind: AttachmentKind, uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            uri: uri.into(),
            name: name.into(),
            size: None,
            duration: None,
        }
    }
}

/// Canonical note record.
///
/// Serialized field names match the persisted JSON shape (camelCase), so a
/// collection round-trips through the storage backend field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable opaque id, assigned at creation.
    pub id: String,
    pub title: String,
    pub content: String,
    /// One of the default category names or a user-added custom name.
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Note {
    /// Creates a new note with a fresh id and current timestamps.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
            attachments: Vec::new(),
        }
    }

    /// Refreshes the edit timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
