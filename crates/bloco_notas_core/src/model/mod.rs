//! Domain model for notes and their categories.
//!
//! # Responsibility
//! - Define the note record shared by the store, view and storage layers.
//! - Own input validation rules that are enforced by the engine.
//! - Define the persisted timestamp representation.
//!
//! # Invariants
//! - Every note is identified by a unique integer `NoteId`.
//! - `created_at <= updated_at` for every note.

pub mod category;
pub mod note;
pub mod timestamp;
