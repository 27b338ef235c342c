//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its persisted field names.
//! - Normalize and validate user input before it reaches the store.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - `created_at` is set once; `updated_at` never moves before it.
//! - Title/content length limits are UI limits only; longer values load fine.

use crate::model::timestamp::serde_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Note identity. Allocated from the creation time in epoch milliseconds.
pub type NoteId = i64;

/// Maximum title length accepted by the editor.
pub const TITLE_MAX_CHARS: usize = 50;
/// Maximum content length accepted by the editor.
pub const CONTENT_MAX_CHARS: usize = 500;

/// One user note.
///
/// Serialized with camelCase field names (`createdAt`, `updatedAt`) to keep
/// the on-device record format stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Free-form label, normally one of `Category::label()`.
    pub category: String,
    #[serde(with = "serde_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a fresh note where both timestamps equal `now`.
    ///
    /// Inputs are stored as given; callers normalize through
    /// [`NoteInput::parse`] first.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an edit in place, keeping identity and creation time.
    ///
    /// `updated_at` never goes backwards, even if the wall clock does.
    pub fn apply(&mut self, input: NoteInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.content = input.content;
        self.category = input.category;
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }
}

/// Validated, trimmed editor input for create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NoteInput {
    /// Trims title and content and rejects blank values.
    ///
    /// The category is kept verbatim.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is empty or whitespace only.
    /// - `EmptyContent` when the content is empty or whitespace only.
    pub fn parse(title: &str, content: &str, category: &str) -> Result<Self, NoteValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
        })
    }
}

/// Rejected editor input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}
