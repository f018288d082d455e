//! Domain model for note and to-do records.
//!
//! # Responsibility
//! - Define the canonical record shapes shared by stores and persistence.
//! - Keep persisted field naming stable (camelCase JSON, lowercase enums).
//!
//! # Invariants
//! - Every record is identified by a stable opaque string id.
//! - Ids are assigned at creation and never rewritten by the stores.

pub mod category;
pub mod due;
pub mod note;
pub mod todo;
